//! Generator options.
//!
//! Options come from an optional `umigen.toml` and are then overridden field by
//! field from the command line:
//!
//! ```toml
//! api-base = "/gateway"
//! request-module = "@umijs/max"
//! enum-style = "string"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default value of the `APIService` constant in client artifacts.
pub const DEFAULT_API_BASE: &str = "/api";
/// Default module the `request` helper is imported from.
pub const DEFAULT_REQUEST_MODULE: &str = "umi";

/// How enum-typed fields are rendered in declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumStyle {
    /// `Array<any>` for every enum field, repeated or not.
    #[default]
    ArrayAny,
    /// Rendered like string fields: `string` or `Array<string>`.
    String,
}

/// Knobs that affect the generated TypeScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Base path every request URL is prefixed with.
    pub api_base: String,
    /// Module exporting the `request` helper.
    pub request_module: String,
    /// Enum field rendering.
    pub enum_style: EnumStyle,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_module: DEFAULT_REQUEST_MODULE.to_string(),
            enum_style: EnumStyle::default(),
        }
    }
}

impl GeneratorOptions {
    /// Parse options from TOML text. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse an options file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&text)
    }
}
