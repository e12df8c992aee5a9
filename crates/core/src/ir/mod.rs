//! Intermediate representation for descriptor → TypeScript generation.
//!
//! Three layers:
//! 1. API-level IR: resolved bindings and flattened declarations (`api`)
//! 2. TypeScript AST: types, expressions, functions, namespaces (`types`)
//! 3. Emission: AST to code strings via the `Emit` trait (`emit`)
//!
//! ## Module Structure
//!
//! - `naming`: case conversion, namespace normalization, path variables
//! - `type_ref`: field kind → TypeScript type
//! - `flatten`: reachable-message discovery grouped by namespace
//! - `binding`: `google.api.http` resolution and per-run ordinals
//! - `normalize`: descriptor file → API IR
//! - `codegen`: API IR → TypeScript AST
//! - `emit`: TypeScript AST → code strings
//! - `utils`: quoting and comment helpers

pub mod api;
pub mod binding;
mod codegen;
mod emit;
pub mod flatten;
pub mod naming;
mod normalize;
pub mod type_ref;
pub mod types;
pub mod utils;

pub use binding::OrdinalCounter;
pub use codegen::{DEPRECATION_COMMENT, codegen_client, codegen_declarations};
pub use emit::Emit;
pub use normalize::normalize_file;
