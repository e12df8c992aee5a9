//! `umigen` command-line interface.
//!
//! Loads a descriptor set, runs the generator and writes the artifacts. All
//! generation logic lives in `umigen-core`.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub mod common;
pub mod generate;

/// Environment variable holding the log level or filter spec.
pub const LOG_ENV: &str = "UMIGEN_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "umigen",
    version,
    about = "Generate umi request clients and TypeScript declarations from protobuf descriptor sets"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate `_service.pb.ts` clients and `.d.ts` declarations
    Generate(generate::GenerateArgs),
}

/// Parse `args` (program name first) and run the selected command.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => generate::run(&args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// Install the stderr fmt subscriber.
///
/// `UMIGEN_LOG` takes a plain level (`debug`, applied to every umigen crate)
/// or a full filter spec such as `umigen_core=trace`. Default: `umigen=info`.
pub fn init_tracing() {
    let filter = filter_spec(std::env::var(LOG_ENV).ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(value: Option<&str>) -> String {
    match value {
        Some(level) if is_plain_level(level) => format!("umigen={level}"),
        Some(spec) => spec.to_string(),
        None => "umigen=info".to_string(),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_spec() {
        assert_eq!(filter_spec(None), "umigen=info");
        assert_eq!(filter_spec(Some("debug")), "umigen=debug");
        assert_eq!(filter_spec(Some("WARN")), "umigen=WARN");
        assert_eq!(filter_spec(Some("umigen_core=trace")), "umigen_core=trace");
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_prints_help() {
        assert_eq!(run_cli(vec!["umigen".into()]), 0);
    }

    #[test]
    fn test_unknown_flag_fails() {
        assert_eq!(run_cli(vec!["umigen".into(), "--bogus".into()]), 2);
    }
}
