//! umigen core: protobuf descriptor sets → umi request clients and
//! TypeScript declarations.
//!
//! ```no_run
//! use umigen_core::{GeneratorOptions, generate};
//!
//! let json = std::fs::read_to_string("set.json")?;
//! for file in generate(&json, GeneratorOptions::default())? {
//!     println!("{}", file.name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod descriptor;
mod emitter;
pub mod error;
pub mod ir;

pub use config::{EnumStyle, GeneratorOptions};
pub use descriptor::{DescriptorPool, parse_descriptor_set};
pub use emitter::{GeneratedFile, Generator, generate};
pub use error::{Error, Result};

/// Name written into the "Code generated by" header of every artifact.
pub const GENERATOR_NAME: &str = "umigen";
