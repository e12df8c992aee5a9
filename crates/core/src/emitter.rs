//! Artifact generation for a whole descriptor set.
//!
//! The pipeline is:
//! 1. Load: descriptor-set JSON -> DescriptorPool
//! 2. Normalize: FileDescriptor -> FileIR (all schema logic resolved here)
//! 3. Codegen: FileIR -> client and declaration TsModules
//! 4. Emit: TsModule -> lines, wrapped in a GeneratedFile

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::GeneratorOptions;
use crate::descriptor::{DescriptorPool, FileDescriptor, parse_descriptor_set};
use crate::error::{Error, Result};
use crate::ir::{Emit, OrdinalCounter, codegen_client, codegen_declarations, normalize_file};

/// One output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub name: String,
    /// Content lines, without line terminators.
    pub lines: Vec<String>,
}

impl GeneratedFile {
    fn from_source(name: String, source: &str) -> Self {
        Self {
            name,
            lines: source.lines().map(str::to_string).collect(),
        }
    }

    /// Full file content, newline-terminated.
    pub fn content(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Write the artifact under `out_dir`, creating parent directories.
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = out_dir.join(&self.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(&path, self.content()).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }
}

/// One generation run.
///
/// Method ordinals are counted per run, so generating several files with the
/// same `Generator` keeps function names distinct across them.
#[derive(Debug, Default)]
pub struct Generator {
    options: GeneratorOptions,
    ordinals: OrdinalCounter,
}

impl Generator {
    /// Create a run with the given options.
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            ordinals: OrdinalCounter::new(),
        }
    }

    /// Options in effect for this run.
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate the client and declaration artifacts of one file.
    ///
    /// Files without services produce nothing.
    pub fn generate_file(
        &mut self,
        pool: &DescriptorPool,
        file: &FileDescriptor,
    ) -> Vec<GeneratedFile> {
        let Some(ir) = normalize_file(pool, file, &self.options, &mut self.ordinals) else {
            debug!(file = %file.name, "No services, skipping.");
            return Vec::new();
        };

        let client = codegen_client(&ir, &self.options).emit();
        let declarations = codegen_declarations(&ir).emit();
        vec![
            GeneratedFile::from_source(ir.client_filename(), &client),
            GeneratedFile::from_source(ir.declarations_filename(), &declarations),
        ]
    }

    /// Generate artifacts for the named proto files, or for every file in the
    /// pool when `only` is empty. Unknown names are skipped with a warning.
    pub fn generate(&mut self, pool: &DescriptorPool, only: &[String]) -> Vec<GeneratedFile> {
        let files: Vec<&FileDescriptor> = if only.is_empty() {
            pool.files().iter().collect()
        } else {
            only.iter()
                .filter_map(|name| {
                    let file = pool.file(name);
                    if file.is_none() {
                        warn!(file = %name, "File not found in descriptor set, skipping.");
                    }
                    file
                })
                .collect()
        };

        let mut out = Vec::new();
        for file in files {
            out.extend(self.generate_file(pool, file));
        }
        info!(artifacts = out.len(), "Generation complete.");
        out
    }
}

/// Parse a descriptor-set JSON document and generate artifacts for every file.
pub fn generate(descriptor_set_json: &str, options: GeneratorOptions) -> Result<Vec<GeneratedFile>> {
    let pool = parse_descriptor_set(descriptor_set_json)?;
    Ok(Generator::new(options).generate(&pool, &[]))
}
