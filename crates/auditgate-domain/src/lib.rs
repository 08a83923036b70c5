//! Pure reconciliation of scan findings against declared exceptions (no IO).
//!
//! Input: findings parsed elsewhere, an exception set, and a severity threshold.
//! Output: unhandled advisory ids, report rows, and unused exceptions.

#![forbid(unsafe_code)]

pub mod exceptions;
pub mod model;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::reconcile;
pub use report::assemble;
