//! Buf descriptor-set JSON → [`DescriptorPool`].
//!
//! `buf build --as-file-descriptor-set -o set.json` renders the
//! `FileDescriptorSet` as protobuf JSON. Extension options show up as bracketed
//! keys, so the HTTP annotation is simply:
//!
//! ```json
//! { "[google.api.http]": { "get": "/v1/users/{user_id}", "additionalBindings": [] } }
//! ```
//!
//! Only the subset the generator needs is modelled. Missing keys default to
//! empty values; unknown keys are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    DescriptorPool, FieldDescriptor, FieldKind, FileDescriptor, HttpPattern, HttpRule, MapEntry,
    MessageDescriptor, MessageId, MessageRef, MethodDescriptor, ServiceDescriptor,
};
use crate::error::Result;

const HTTP_OPTION_KEY: &str = "[google.api.http]";

/// `FileDescriptorProto.service` field number, used in source-code-info paths.
const SERVICE_FIELD_NUMBER: i32 = 6;
/// `ServiceDescriptorProto.method` field number.
const METHOD_FIELD_NUMBER: i32 = 2;

#[derive(Debug, Deserialize)]
struct FileDescriptorSetJson {
    #[serde(default)]
    file: Vec<FileDescriptorProtoJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FileDescriptorProtoJson {
    name: String,
    package: String,
    message_type: Vec<DescriptorProtoJson>,
    service: Vec<ServiceDescriptorProtoJson>,
    source_code_info: Option<SourceCodeInfoJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DescriptorProtoJson {
    name: String,
    field: Vec<FieldDescriptorProtoJson>,
    nested_type: Vec<DescriptorProtoJson>,
    options: Option<MessageOptionsJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MessageOptionsJson {
    map_entry: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FieldDescriptorProtoJson {
    name: String,
    label: String,
    #[serde(rename = "type")]
    typ: String,
    type_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServiceDescriptorProtoJson {
    name: String,
    method: Vec<MethodDescriptorProtoJson>,
    options: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MethodDescriptorProtoJson {
    name: String,
    input_type: String,
    output_type: String,
    options: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourceCodeInfoJson {
    location: Vec<LocationJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LocationJson {
    path: Vec<i32>,
    leading_comments: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HttpRuleJson {
    get: Option<String>,
    put: Option<String>,
    post: Option<String>,
    delete: Option<String>,
    patch: Option<String>,
    custom: Option<CustomHttpPatternJson>,
    body: String,
    response_body: String,
    additional_bindings: Vec<HttpRuleJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CustomHttpPatternJson {
    kind: String,
    path: String,
}

/// Parse a Buf descriptor-set JSON document into a [`DescriptorPool`].
///
/// Only malformed JSON is an error. Type references that cannot be resolved
/// become [`FieldKind::Unknown`] and are rendered with the string fallback.
pub fn parse_descriptor_set(text: &str) -> Result<DescriptorPool> {
    let set: FileDescriptorSetJson = serde_json::from_str(text)?;
    let mut pool = DescriptorPool::new();

    // Pass 1: allocate every message (nested ones included) so that field
    // references can be resolved regardless of declaration order.
    let mut pending: Vec<(MessageId, &DescriptorProtoJson)> = Vec::new();
    let mut top_level: Vec<Vec<MessageId>> = Vec::with_capacity(set.file.len());
    for file in &set.file {
        let mut ids = Vec::with_capacity(file.message_type.len());
        for message in &file.message_type {
            ids.push(register_message(
                &mut pool,
                &file.package,
                &file.package,
                message,
                &mut pending,
            ));
        }
        top_level.push(ids);
    }

    // Pass 2: resolve fields now that every message has an id.
    let raw_by_id: BTreeMap<MessageId, &DescriptorProtoJson> = pending.iter().copied().collect();
    for (id, raw) in &pending {
        let fields = raw
            .field
            .iter()
            .map(|f| convert_field(&pool, &raw_by_id, f))
            .collect();
        if let Some(message) = pool.message_mut(*id) {
            message.fields = fields;
        }
    }

    // Pass 3: files and services.
    for (file, messages) in set.file.iter().zip(top_level) {
        let services = file
            .service
            .iter()
            .enumerate()
            .map(|(index, service)| convert_service(&pool, file, index, service))
            .collect();
        debug!(
            file = %file.name,
            package = %file.package,
            messages = messages.len(),
            "Loaded descriptor file."
        );
        pool.add_file(FileDescriptor {
            name: file.name.clone(),
            package: file.package.clone(),
            messages,
            services,
        });
    }

    Ok(pool)
}

fn register_message<'a>(
    pool: &mut DescriptorPool,
    package: &str,
    scope: &str,
    raw: &'a DescriptorProtoJson,
    pending: &mut Vec<(MessageId, &'a DescriptorProtoJson)>,
) -> MessageId {
    let full_name = if scope.is_empty() {
        raw.name.clone()
    } else {
        format!("{scope}.{}", raw.name)
    };
    let id = pool.add_message(MessageDescriptor {
        name: raw.name.clone(),
        full_name: full_name.clone(),
        package: package.to_string(),
        fields: Vec::new(),
        map_entry: raw.options.as_ref().is_some_and(|o| o.map_entry),
    });
    pending.push((id, raw));
    for nested in &raw.nested_type {
        register_message(pool, package, &full_name, nested, pending);
    }
    id
}

fn convert_field(
    pool: &DescriptorPool,
    raw_by_id: &BTreeMap<MessageId, &DescriptorProtoJson>,
    raw: &FieldDescriptorProtoJson,
) -> FieldDescriptor {
    let kind = convert_kind(pool, raw);
    let repeated = raw.label == "LABEL_REPEATED";

    let map = match &kind {
        FieldKind::Message(id) if repeated => pool
            .message(*id)
            .filter(|m| m.map_entry)
            .and_then(|_| raw_by_id.get(id))
            .and_then(|entry| map_entry(pool, raw_by_id, entry)),
        _ => None,
    };

    FieldDescriptor {
        name: raw.name.clone(),
        kind,
        repeated,
        map,
    }
}

fn map_entry(
    pool: &DescriptorPool,
    raw_by_id: &BTreeMap<MessageId, &DescriptorProtoJson>,
    entry: &DescriptorProtoJson,
) -> Option<MapEntry> {
    let key = entry.field.iter().find(|f| f.name == "key")?;
    let value = entry.field.iter().find(|f| f.name == "value")?;
    Some(MapEntry {
        key: Box::new(convert_field(pool, raw_by_id, key)),
        value: Box::new(convert_field(pool, raw_by_id, value)),
    })
}

fn convert_kind(pool: &DescriptorPool, raw: &FieldDescriptorProtoJson) -> FieldKind {
    match raw.typ.as_str() {
        "TYPE_DOUBLE" => FieldKind::Double,
        "TYPE_FLOAT" => FieldKind::Float,
        "TYPE_INT64" => FieldKind::Int64,
        "TYPE_UINT64" => FieldKind::Uint64,
        "TYPE_INT32" => FieldKind::Int32,
        "TYPE_FIXED64" => FieldKind::Fixed64,
        "TYPE_FIXED32" => FieldKind::Fixed32,
        "TYPE_BOOL" => FieldKind::Bool,
        "TYPE_STRING" => FieldKind::String,
        "TYPE_GROUP" => FieldKind::Group,
        "TYPE_BYTES" => FieldKind::Bytes,
        "TYPE_UINT32" => FieldKind::Uint32,
        "TYPE_SFIXED32" => FieldKind::Sfixed32,
        "TYPE_SFIXED64" => FieldKind::Sfixed64,
        "TYPE_SINT32" => FieldKind::Sint32,
        "TYPE_SINT64" => FieldKind::Sint64,
        "TYPE_ENUM" => FieldKind::Enum(trim_type_name(&raw.type_name).to_string()),
        "TYPE_MESSAGE" => match pool.find_message(&raw.type_name) {
            Some(id) => FieldKind::Message(id),
            None => {
                warn!(
                    field = %raw.name,
                    type_name = %raw.type_name,
                    "Unresolved message reference, falling back to string."
                );
                FieldKind::Unknown(trim_type_name(&raw.type_name).to_string())
            }
        },
        other => FieldKind::Unknown(other.to_string()),
    }
}

fn convert_service(
    pool: &DescriptorPool,
    file: &FileDescriptorProtoJson,
    service_index: usize,
    raw: &ServiceDescriptorProtoJson,
) -> ServiceDescriptor {
    let full_name = if file.package.is_empty() {
        raw.name.clone()
    } else {
        format!("{}.{}", file.package, raw.name)
    };
    let methods = raw
        .method
        .iter()
        .enumerate()
        .map(|(method_index, method)| MethodDescriptor {
            name: method.name.clone(),
            input: message_ref(pool, &method.input_type),
            output: message_ref(pool, &method.output_type),
            leading_comments: leading_comments(file, service_index, method_index),
            deprecated: is_deprecated(&method.options),
            http: method.options.get(HTTP_OPTION_KEY).map(convert_http_rule),
        })
        .collect();

    ServiceDescriptor {
        name: raw.name.clone(),
        full_name,
        deprecated: is_deprecated(&raw.options),
        methods,
    }
}

fn message_ref(pool: &DescriptorPool, type_name: &str) -> MessageRef {
    MessageRef {
        type_name: trim_type_name(type_name).to_string(),
        id: pool.find_message(type_name),
    }
}

fn is_deprecated(options: &BTreeMap<String, Value>) -> bool {
    options
        .get("deprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn leading_comments(
    file: &FileDescriptorProtoJson,
    service_index: usize,
    method_index: usize,
) -> String {
    let Some(info) = &file.source_code_info else {
        return String::new();
    };
    let (Ok(service_index), Ok(method_index)) =
        (i32::try_from(service_index), i32::try_from(method_index))
    else {
        return String::new();
    };
    let path = [
        SERVICE_FIELD_NUMBER,
        service_index,
        METHOD_FIELD_NUMBER,
        method_index,
    ];
    info.location
        .iter()
        .find(|loc| loc.path == path)
        .and_then(|loc| loc.leading_comments.clone())
        .unwrap_or_default()
}

fn convert_http_rule(value: &Value) -> HttpRule {
    match serde_json::from_value::<HttpRuleJson>(value.clone()) {
        Ok(raw) => http_rule_from_json(raw),
        Err(err) => {
            warn!(error = %err, "Malformed google.api.http annotation, binding left inert.");
            HttpRule::new(HttpPattern::Unknown)
        }
    }
}

fn http_rule_from_json(raw: HttpRuleJson) -> HttpRule {
    let pattern = if let Some(path) = raw.get {
        HttpPattern::Get(path)
    } else if let Some(path) = raw.put {
        HttpPattern::Put(path)
    } else if let Some(path) = raw.post {
        HttpPattern::Post(path)
    } else if let Some(path) = raw.delete {
        HttpPattern::Delete(path)
    } else if let Some(path) = raw.patch {
        HttpPattern::Patch(path)
    } else if let Some(custom) = raw.custom {
        HttpPattern::Custom {
            kind: custom.kind,
            path: custom.path,
        }
    } else {
        HttpPattern::Unknown
    };

    HttpRule {
        pattern,
        body: raw.body,
        response_body: raw.response_body,
        additional_bindings: raw
            .additional_bindings
            .into_iter()
            .map(http_rule_from_json)
            .collect(),
    }
}

fn trim_type_name(type_name: &str) -> &str {
    type_name.strip_prefix('.').unwrap_or(type_name)
}
