//! API-level IR for one schema file.
//!
//! Everything schema-specific is already resolved here: bindings carry their
//! verb, path and ordinal, messages carry mapped field types. Codegen only
//! arranges these into TypeScript.

use super::types::TsType;

/// Normalized view of one file that declares at least one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIR {
    /// Output name prefix: the proto path without `.proto`.
    pub prefix: String,
    /// Services in declaration order.
    pub services: Vec<ServiceIR>,
    /// Declaration blocks in order of first encounter.
    pub namespaces: Vec<NamespaceIR>,
}

impl FileIR {
    /// `<prefix>_service.pb.ts`
    pub fn client_filename(&self) -> String {
        format!("{}_service.pb.ts", self.prefix)
    }

    /// `<prefix>.d.ts`
    pub fn declarations_filename(&self) -> String {
        format!("{}.d.ts", self.prefix)
    }
}

/// One service and its resolved bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIR {
    /// Fully-qualified service name.
    pub full_name: String,
    /// Service carries `deprecated = true`.
    pub deprecated: bool,
    /// Resolved bindings of every method, in emission order.
    pub bindings: Vec<BindingIR>,
}

/// One client function: a method bound to one verb and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingIR {
    /// Method identifier.
    pub method: String,
    /// Per-run emission counter for this method identifier.
    pub ordinal: usize,
    /// Method comment, flattened to one line.
    pub comment: String,
    /// Method carries `deprecated = true`.
    pub deprecated: bool,
    /// HTTP verb; empty for an unrecognized pattern.
    pub verb: String,
    /// URL path template; empty for an unrecognized pattern.
    pub path: String,
    /// Names of the `{var}` path segments.
    pub path_vars: Vec<String>,
    /// `.`-prefixed, case-converted body field path.
    pub body: Option<String>,
    /// `.`-prefixed, case-converted response body field path.
    pub response_body: Option<String>,
    /// Type of the `params` argument.
    pub request: TsType,
    /// Type argument of `request<...>`.
    pub reply: TsType,
}

impl BindingIR {
    /// Exported function name: the method identifier, suffixed with the
    /// ordinal for every binding after the first.
    pub fn fn_name(&self) -> String {
        if self.ordinal == 0 {
            self.method.clone()
        } else {
            format!("{}{}", self.method, self.ordinal)
        }
    }

    /// Request parameters travel in the body rather than the query string.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Messages declared under one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceIR {
    /// Normalized namespace; empty for messages without a package.
    pub name: String,
    /// Messages in recorded order.
    pub messages: Vec<MessageIR>,
}

/// One structural type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageIR {
    /// Local message name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldIR>,
}

/// One optional property of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIR {
    /// Field name as declared.
    pub name: String,
    /// Mapped type.
    pub ty: TsType,
}
