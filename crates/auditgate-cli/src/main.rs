//! CLI entry point for auditgate.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `auditgate-app` crate.

use anyhow::Context;
use auditgate_app::{
    AuditInput, exception_table, resolve_options, run_audit, security_table, serialize_report,
    summary_message, unused_exception_warnings, verdict_exit_code,
};
use auditgate_render::render_table;
use auditgate_settings::{OutputMode, Overrides};
use auditgate_types::{Column, ids};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "auditgate",
    version,
    about = "Exception-aware pass/fail gate for npm audit reports"
)]
struct Cli {
    /// Project root (directory containing the config and exceptions file).
    #[arg(long, global = true, default_value = ".")]
    root: Utf8PathBuf,

    /// Path to auditgate config TOML, relative to the project root.
    #[arg(long, global = true, default_value = ids::DEFAULT_CONFIG_FILE)]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile an npm audit JSON payload against declared exceptions.
    Audit(AuditArgs),

    /// List the security report columns accepted by --include-columns.
    Columns,
}

#[derive(Args, Debug)]
struct AuditArgs {
    /// File holding `npm audit --json` output (`-` or omitted reads stdin).
    #[arg(long)]
    input: Option<Utf8PathBuf>,

    /// Minimum severity to audit (info|low|moderate|high|critical).
    #[arg(short, long, env = ids::ENV_AUDIT_LEVEL)]
    level: Option<String>,

    /// Advisory ids to except for this run (comma separated).
    #[arg(short = 'x', long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Module names to except for this run (comma separated).
    #[arg(short = 'm', long, value_delimiter = ',')]
    module_ignore: Vec<String>,

    /// Security report columns to show (comma separated header or key names).
    #[arg(short = 'i', long, value_delimiter = ',')]
    include_columns: Vec<String>,

    /// Exceptions file, relative to the project root.
    #[arg(long)]
    exceptions_file: Option<String>,

    /// Print the JSON report document instead of tables.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Audit(ref args) => cmd_audit(&cli, args),
        Commands::Columns => {
            cmd_columns();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_audit(cli: &Cli, args: &AuditArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Missing config file is allowed (defaults apply).
        let cfg_text = read_optional(&cli.root.join(&cli.config))?;

        let overrides = Overrides {
            level: args.level.clone(),
            exclude: args.exclude.clone(),
            module_ignore: args.module_ignore.clone(),
            include_columns: args.include_columns.clone(),
            exceptions_file: args.exceptions_file.clone(),
            json: args.json,
        };
        let resolved = resolve_options(&cfg_text, overrides)?;

        // Missing exceptions file means no persisted exceptions.
        let declarations_text = read_optional(&cli.root.join(&resolved.exceptions_file))?;
        let payload_text = read_payload(args.input.as_deref())?;

        let output = run_audit(AuditInput {
            payload_text: &payload_text,
            declarations_text: &declarations_text,
            resolved: &resolved,
            today: OffsetDateTime::now_utc().date(),
        })?;

        match resolved.output {
            OutputMode::Json => {
                print!("{}", serialize_report(&output.report)?);
                if output.result.failed {
                    eprintln!("{}", summary_message(&output.result));
                }
            }
            OutputMode::Table if output.result.failed => {
                eprintln!("{}", summary_message(&output.result));
            }
            OutputMode::Table => {
                if let Some(table) = exception_table(&output.assembled) {
                    println!("{}", render_table(&table));
                }
                if let Some(table) = security_table(&output.assembled) {
                    println!("{}", render_table(&table));
                }
                for w in unused_exception_warnings(&output.result, &resolved.exceptions_file) {
                    eprintln!("{w}");
                }
                let summary = summary_message(&output.result);
                if !output.result.unhandled_ids.is_empty() {
                    eprintln!("{summary}");
                } else {
                    println!("{summary}");
                }
            }
        }

        Ok(verdict_exit_code(output.verdict()))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("auditgate error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_columns() {
    for column in Column::ALL {
        println!("{:<10} {}", column.header(), column.key());
    }
}

fn read_optional(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(anyhow::Error::new(err).context(format!("read {path}"))),
    }
}

fn read_payload(input: Option<&Utf8Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_str() != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("read audit payload: {path}"))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read audit payload from stdin")?;
            Ok(text)
        }
    }
}
