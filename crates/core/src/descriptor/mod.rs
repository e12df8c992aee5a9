//! Descriptor model consumed by the generator.
//!
//! A [`DescriptorPool`] owns every file of a descriptor set plus a single arena
//! of message descriptors. Fields that reference another message carry the
//! target's [`MessageId`], so shared and cyclic references need no ownership.
//!
//! The pool is normally built by [`parse_descriptor_set`], but every type here
//! can be constructed directly, which is how the unit tests build small graphs.

mod json;

use std::collections::HashMap;

pub use json::parse_descriptor_set;

/// Index of a message inside a [`DescriptorPool`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub usize);

/// All files and messages of one descriptor set.
#[derive(Debug, Default, Clone)]
pub struct DescriptorPool {
    files: Vec<FileDescriptor>,
    messages: Vec<MessageDescriptor>,
    by_full_name: HashMap<String, MessageId>,
}

impl DescriptorPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the arena and return its id.
    ///
    /// The first message registered under a full name owns that name for
    /// [`DescriptorPool::find_message`] lookups.
    pub fn add_message(&mut self, message: MessageDescriptor) -> MessageId {
        let id = MessageId(self.messages.len());
        self.by_full_name
            .entry(message.full_name.clone())
            .or_insert(id);
        self.messages.push(message);
        id
    }

    /// Add a file to the pool.
    pub fn add_file(&mut self, file: FileDescriptor) {
        self.files.push(file);
    }

    /// Look up a message by id.
    pub fn message(&self, id: MessageId) -> Option<&MessageDescriptor> {
        self.messages.get(id.0)
    }

    /// Mutable access to a message, used while fields are being resolved.
    pub fn message_mut(&mut self, id: MessageId) -> Option<&mut MessageDescriptor> {
        self.messages.get_mut(id.0)
    }

    /// Look up a message by fully-qualified name. A leading `.` is accepted.
    pub fn find_message(&self, full_name: &str) -> Option<MessageId> {
        let name = full_name.strip_prefix('.').unwrap_or(full_name);
        self.by_full_name.get(name).copied()
    }

    /// All files, in the order they were added.
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Look up a file by its proto path (e.g. `api/helloworld/v1/greeter.proto`).
    pub fn file(&self, name: &str) -> Option<&FileDescriptor> {
        self.files.iter().find(|f| f.name == name)
    }
}

/// One `.proto` file.
#[derive(Debug, Default, Clone)]
pub struct FileDescriptor {
    /// Proto path relative to the include root.
    pub name: String,
    /// Dotted package name, possibly empty.
    pub package: String,
    /// Top-level messages declared by the file.
    pub messages: Vec<MessageId>,
    /// Services declared by the file.
    pub services: Vec<ServiceDescriptor>,
}

impl FileDescriptor {
    /// Output file name prefix: the proto path without its `.proto` suffix.
    pub fn generated_filename_prefix(&self) -> &str {
        self.name.strip_suffix(".proto").unwrap_or(&self.name)
    }
}

/// One message type.
#[derive(Debug, Default, Clone)]
pub struct MessageDescriptor {
    /// Local (unqualified) name.
    pub name: String,
    /// Fully-qualified name without a leading dot.
    pub full_name: String,
    /// Package of the file that declares the message.
    pub package: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Synthetic key/value message backing a map field.
    pub map_entry: bool,
}

impl MessageDescriptor {
    /// Create a top-level message in `package`.
    pub fn new(package: &str, name: &str) -> Self {
        let full_name = if package.is_empty() {
            name.to_string()
        } else {
            format!("{package}.{name}")
        };
        Self {
            name: name.to_string(),
            full_name,
            package: package.to_string(),
            fields: Vec::new(),
            map_entry: false,
        }
    }

    /// Builder-style helper to append a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

/// Protobuf field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `double`
    Double,
    /// `float`
    Float,
    /// `int64`
    Int64,
    /// `uint64`
    Uint64,
    /// `int32`
    Int32,
    /// `fixed64`
    Fixed64,
    /// `fixed32`
    Fixed32,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// Legacy proto2 group.
    Group,
    /// `bytes`
    Bytes,
    /// `uint32`
    Uint32,
    /// `sfixed32`
    Sfixed32,
    /// `sfixed64`
    Sfixed64,
    /// `sint32`
    Sint32,
    /// `sint64`
    Sint64,
    /// Reference to another message in the pool.
    Message(MessageId),
    /// Reference to an enum type, by fully-qualified name.
    Enum(String),
    /// A kind or type reference the loader could not resolve.
    Unknown(String),
}

impl FieldKind {
    /// Integer and floating-point kinds of every width and encoding.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Double
                | FieldKind::Float
                | FieldKind::Int64
                | FieldKind::Uint64
                | FieldKind::Int32
                | FieldKind::Fixed64
                | FieldKind::Fixed32
                | FieldKind::Uint32
                | FieldKind::Sfixed32
                | FieldKind::Sfixed64
                | FieldKind::Sint32
                | FieldKind::Sint64
        )
    }
}

/// One message field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as declared in the schema.
    pub name: String,
    /// Field kind. For map fields this is the map-entry message.
    pub kind: FieldKind,
    /// `repeated` label.
    pub repeated: bool,
    /// Key and value descriptors when the field is a map.
    pub map: Option<MapEntry>,
}

impl FieldDescriptor {
    /// Singular field of the given kind.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            repeated: false,
            map: None,
        }
    }

    /// Repeated field of the given kind.
    pub fn repeated(name: &str, kind: FieldKind) -> Self {
        Self {
            repeated: true,
            ..Self::new(name, kind)
        }
    }

    /// Map field with the given key and value kinds.
    ///
    /// `entry` is the synthetic map-entry message when one exists in the pool.
    pub fn map(name: &str, entry: Option<MessageId>, key: FieldKind, value: FieldKind) -> Self {
        let kind = entry.map_or_else(|| FieldKind::Unknown(String::new()), FieldKind::Message);
        Self {
            name: name.to_string(),
            kind,
            repeated: true,
            map: Some(MapEntry {
                key: Box::new(Self::new("key", key)),
                value: Box::new(Self::new("value", value)),
            }),
        }
    }

    /// Whether the field is a map.
    pub fn is_map(&self) -> bool {
        self.map.is_some()
    }
}

/// Key and value of a map field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// Map key descriptor.
    pub key: Box<FieldDescriptor>,
    /// Map value descriptor.
    pub value: Box<FieldDescriptor>,
}

/// One RPC service.
#[derive(Debug, Default, Clone)]
pub struct ServiceDescriptor {
    /// Local service name, e.g. `Greeter`.
    pub name: String,
    /// Fully-qualified service name, e.g. `helloworld.Greeter`.
    pub full_name: String,
    /// `option deprecated = true`.
    pub deprecated: bool,
    /// Methods in declaration order.
    pub methods: Vec<MethodDescriptor>,
}

/// One RPC method.
#[derive(Debug, Default, Clone)]
pub struct MethodDescriptor {
    /// Method identifier, e.g. `SayHello`.
    pub name: String,
    /// Request message.
    pub input: MessageRef,
    /// Response message.
    pub output: MessageRef,
    /// Leading comment text attached to the method.
    pub leading_comments: String,
    /// `option deprecated = true`.
    pub deprecated: bool,
    /// `(google.api.http)` annotation.
    pub http: Option<HttpRule>,
}

/// Request or response type of a method.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageRef {
    /// Fully-qualified type name as written in the descriptor.
    pub type_name: String,
    /// Resolved message, when the pool knows it.
    pub id: Option<MessageId>,
}

impl MessageRef {
    /// Reference to a message already in the pool.
    pub fn resolved(pool: &DescriptorPool, id: MessageId) -> Self {
        let type_name = pool
            .message(id)
            .map(|m| m.full_name.clone())
            .unwrap_or_default();
        Self {
            type_name,
            id: Some(id),
        }
    }

    /// Last dotted segment of the type name.
    pub fn local_name(&self) -> &str {
        self.type_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.type_name)
    }
}

/// `google.api.HttpRule`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRule {
    /// Verb and path template.
    pub pattern: HttpPattern,
    /// Request field mapped to the HTTP body (`*` for the whole request).
    pub body: String,
    /// Response field mapped to the HTTP body.
    pub response_body: String,
    /// Alternate bindings for the same method.
    pub additional_bindings: Vec<HttpRule>,
}

impl HttpRule {
    /// Rule with the given pattern and no body mapping.
    pub fn new(pattern: HttpPattern) -> Self {
        Self {
            pattern,
            body: String::new(),
            response_body: String::new(),
            additional_bindings: Vec::new(),
        }
    }

    /// Builder-style helper to set the body field path.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Builder-style helper to set the response body field path.
    pub fn with_response_body(mut self, response_body: &str) -> Self {
        self.response_body = response_body.to_string();
        self
    }

    /// Builder-style helper to append an additional binding.
    pub fn with_binding(mut self, binding: HttpRule) -> Self {
        self.additional_bindings.push(binding);
        self
    }
}

/// The `pattern` oneof of an [`HttpRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpPattern {
    /// `get: "<path>"`
    Get(String),
    /// `put: "<path>"`
    Put(String),
    /// `post: "<path>"`
    Post(String),
    /// `delete: "<path>"`
    Delete(String),
    /// `patch: "<path>"`
    Patch(String),
    /// `custom: { kind, path }`
    Custom {
        /// Custom verb, e.g. `HEAD`.
        kind: String,
        /// Path template.
        path: String,
    },
    /// Missing or unrecognized pattern.
    Unknown,
}

impl HttpPattern {
    /// HTTP verb and path template. Unknown patterns yield two empty strings.
    pub fn verb_and_path(&self) -> (&str, &str) {
        match self {
            HttpPattern::Get(path) => ("GET", path),
            HttpPattern::Put(path) => ("PUT", path),
            HttpPattern::Post(path) => ("POST", path),
            HttpPattern::Delete(path) => ("DELETE", path),
            HttpPattern::Patch(path) => ("PATCH", path),
            HttpPattern::Custom { kind, path } => (kind, path),
            HttpPattern::Unknown => ("", ""),
        }
    }
}
