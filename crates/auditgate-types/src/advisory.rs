use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable advisory identifier as reported by the scanner.
///
/// npm reports legacy advisories with integer ids (`1001`) and modern ones
/// with strings (`GHSA-xxxx-xxxx-xxxx`). Both are normalized to their string
/// form so exception keys can be compared with plain equality.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, JsonSchema,
)]
#[serde(transparent)]
pub struct AdvisoryId(String);

impl AdvisoryId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AdvisoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AdvisoryId {
    fn from(value: &str) -> Self {
        AdvisoryId::new(value)
    }
}

impl From<String> for AdvisoryId {
    fn from(value: String) -> Self {
        AdvisoryId::new(value)
    }
}

impl From<u64> for AdvisoryId {
    fn from(value: u64) -> Self {
        AdvisoryId(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAdvisoryId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for AdvisoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawAdvisoryId::deserialize(deserializer)? {
            RawAdvisoryId::Number(n) => AdvisoryId::from(n),
            RawAdvisoryId::Text(s) => AdvisoryId::new(s),
        })
    }
}
