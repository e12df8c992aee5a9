//! `umigen generate`: descriptor set in, artifacts out.

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use umigen_core::{Generator, GeneratorOptions, parse_descriptor_set};

use crate::common::EnumStyleArg;

/// Arguments of `umigen generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Descriptor set rendered as JSON (`buf build --as-file-descriptor-set -o set.json`)
    #[arg(long = "descriptor-set", value_name = "PATH")]
    pub descriptor_set: PathBuf,
    /// Directory the artifacts are written to
    #[arg(long = "out", value_name = "DIR")]
    pub out: PathBuf,
    /// Only generate for these proto files (repeatable)
    #[arg(long = "file", value_name = "PROTO")]
    pub files: Vec<String>,
    /// Options file (TOML)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Base path prefixed to every request URL
    #[arg(long = "api-base", value_name = "STR")]
    pub api_base: Option<String>,
    /// Module the `request` helper is imported from
    #[arg(long = "request-module", value_name = "STR")]
    pub request_module: Option<String>,
    /// Enum field rendering
    #[arg(long = "enum-style", value_enum)]
    pub enum_style: Option<EnumStyleArg>,
    /// List the artifacts instead of writing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Options file values, overridden by any flag given on the command line.
    fn options(&self) -> Result<GeneratorOptions, String> {
        let mut options = match &self.config {
            Some(path) => GeneratorOptions::from_file(path).map_err(|e| e.to_string())?,
            None => GeneratorOptions::default(),
        };
        if let Some(api_base) = &self.api_base {
            options.api_base.clone_from(api_base);
        }
        if let Some(request_module) = &self.request_module {
            options.request_module.clone_from(request_module);
        }
        if let Some(enum_style) = self.enum_style {
            options.enum_style = enum_style.into();
        }
        Ok(options)
    }
}

/// Run `umigen generate` and map the outcome to an exit code.
pub fn run(args: &GenerateArgs) -> i32 {
    match run_inner(args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn run_inner(args: &GenerateArgs) -> Result<(), String> {
    let options = args.options()?;
    debug!(?options, "Resolved generator options.");

    let json = read_descriptor_set(&args.descriptor_set)?;
    let pool = parse_descriptor_set(&json).map_err(|e| e.to_string())?;
    let artifacts = Generator::new(options).generate(&pool, &args.files);

    if args.dry_run {
        for artifact in &artifacts {
            println!(
                "{} ({} lines)",
                args.out.join(&artifact.name).display(),
                artifact.lines.len()
            );
        }
        return Ok(());
    }

    for artifact in &artifacts {
        let path = artifact.write_to(&args.out).map_err(|e| e.to_string())?;
        info!(path = %path.display(), "Wrote artifact.");
    }
    println!(
        "Generated {} file(s) in {}",
        artifacts.len(),
        args.out.display()
    );
    Ok(())
}

fn read_descriptor_set(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read descriptor set {}: {e}", path.display()))
}
