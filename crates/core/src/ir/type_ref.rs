//! Field and message type references.

use tracing::warn;

use super::naming::namespace_of;
use super::types::{TsPrimitive, TsType};
use crate::config::EnumStyle;
use crate::descriptor::{DescriptorPool, FieldDescriptor, FieldKind, MessageId, MessageRef};

/// Map one field to its TypeScript type.
///
/// Maps become `Map<K, V>` from the entry's key and value. Otherwise the kind
/// picks the element type and `repeated` wraps it in `Array<...>`, except for
/// enums under [`EnumStyle::ArrayAny`], which are always `Array<any>`.
pub fn field_type(pool: &DescriptorPool, field: &FieldDescriptor, enum_style: EnumStyle) -> TsType {
    if let Some(entry) = &field.map {
        return TsType::map(
            field_type(pool, &entry.key, enum_style),
            field_type(pool, &entry.value, enum_style),
        );
    }

    let element = match &field.kind {
        FieldKind::Bool => TsType::Primitive(TsPrimitive::Boolean),
        kind if kind.is_numeric() => TsType::Primitive(TsPrimitive::Number),
        FieldKind::Message(id) => message_type(pool, *id).unwrap_or_else(|| {
            warn!(field = %field.name, id = id.0, "Dangling message id, falling back to string.");
            TsType::Primitive(TsPrimitive::String)
        }),
        FieldKind::Enum(_) if enum_style == EnumStyle::ArrayAny => {
            return TsType::array(TsType::Primitive(TsPrimitive::Any));
        }
        _ => TsType::Primitive(TsPrimitive::String),
    };

    if field.repeated {
        TsType::array(element)
    } else {
        element
    }
}

/// `<Namespace>.<LocalName>` for a message in the pool.
pub fn message_type(pool: &DescriptorPool, id: MessageId) -> Option<TsType> {
    pool.message(id)
        .map(|m| TsType::qualified(&namespace_of(&m.package), &m.name))
}

/// Type of a method's request or response message.
///
/// Unresolved references are qualified from the dotted type name itself: the
/// part before the last `.` is taken as the package.
pub fn message_ref_type(pool: &DescriptorPool, message: &MessageRef) -> TsType {
    if let Some(ty) = message.id.and_then(|id| message_type(pool, id)) {
        return ty;
    }
    let type_name = message.type_name.trim_start_matches('.');
    match type_name.rsplit_once('.') {
        Some((package, name)) => TsType::qualified(&namespace_of(package), name),
        None => TsType::Ref(type_name.to_string()),
    }
}
