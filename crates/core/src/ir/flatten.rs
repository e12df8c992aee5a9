//! Message graph flattening.
//!
//! Starting from a file's top-level messages, every message reachable through
//! field references is collected, grouped by namespace and de-duplicated by
//! `(namespace, local name)`. The work queue is FIFO and every message is
//! checked against the visited set both before it is enqueued and when it is
//! dequeued, so cycles (self-references included) terminate.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use super::api::{FieldIR, MessageIR, NamespaceIR};
use super::naming::namespace_of;
use super::type_ref::field_type;
use crate::config::EnumStyle;
use crate::descriptor::{DescriptorPool, FieldDescriptor, FieldKind, MessageDescriptor, MessageId};

/// Collect every message reachable from `roots`, grouped by namespace.
///
/// Namespaces appear in order of first encounter; messages within one appear
/// in the order they were recorded. Map-entry messages are not declared, but
/// the message type of a map's value is followed.
pub fn flatten_messages(
    pool: &DescriptorPool,
    roots: &[MessageId],
    enum_style: EnumStyle,
) -> Vec<NamespaceIR> {
    let mut queue: VecDeque<MessageId> = roots.iter().copied().collect();
    let mut visited: HashSet<(String, String)> = HashSet::new();
    let mut namespaces: Vec<NamespaceIR> = Vec::new();

    while let Some(id) = queue.pop_front() {
        let Some(message) = pool.message(id) else {
            continue;
        };
        if message.map_entry || !visited.insert(key_of(message)) {
            continue;
        }

        let namespace = namespace_of(&message.package);
        let fields = message
            .fields
            .iter()
            .map(|field| FieldIR {
                name: field.name.clone(),
                ty: field_type(pool, field, enum_style),
            })
            .collect();
        let declaration = MessageIR {
            name: message.name.clone(),
            fields,
        };
        match namespaces.iter_mut().find(|ns| ns.name == namespace) {
            Some(ns) => ns.messages.push(declaration),
            None => namespaces.push(NamespaceIR {
                name: namespace,
                messages: vec![declaration],
            }),
        }

        enqueue_targets(pool, &message.fields, &visited, &mut queue);
    }

    for ns in &namespaces {
        debug!(namespace = %ns.name, messages = ns.messages.len(), "Flattened namespace.");
    }
    namespaces
}

fn key_of(message: &MessageDescriptor) -> (String, String) {
    (namespace_of(&message.package), message.name.clone())
}

fn enqueue_targets(
    pool: &DescriptorPool,
    fields: &[FieldDescriptor],
    visited: &HashSet<(String, String)>,
    queue: &mut VecDeque<MessageId>,
) {
    for field in fields {
        let target = match &field.map {
            Some(entry) => match entry.value.kind {
                FieldKind::Message(id) => id,
                _ => continue,
            },
            None => match field.kind {
                FieldKind::Message(id) => id,
                _ => continue,
            },
        };
        let Some(message) = pool.message(target) else {
            continue;
        };
        if !message.map_entry && !visited.contains(&key_of(message)) {
            queue.push_back(target);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::types::{TsPrimitive, TsType};

    fn names(namespaces: &[NamespaceIR]) -> Vec<(&str, Vec<&str>)> {
        namespaces
            .iter()
            .map(|ns| {
                (
                    ns.name.as_str(),
                    ns.messages.iter().map(|m| m.name.as_str()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_roots() {
        let pool = DescriptorPool::new();
        assert!(flatten_messages(&pool, &[], EnumStyle::ArrayAny).is_empty());
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut pool = DescriptorPool::new();
        let node = pool.add_message(MessageDescriptor::new("tree", "Node"));
        pool.message_mut(node)
            .unwrap()
            .fields
            .push(FieldDescriptor::repeated("children", FieldKind::Message(node)));

        let out = flatten_messages(&pool, &[node], EnumStyle::ArrayAny);
        assert_eq!(names(&out), vec![("Tree", vec!["Node"])]);
        assert_eq!(
            out[0].messages[0].fields[0].ty,
            TsType::array(TsType::Ref("Tree.Node".into()))
        );
    }

    #[test]
    fn test_mutual_cycle_emits_each_once() {
        let mut pool = DescriptorPool::new();
        let a = pool.add_message(MessageDescriptor::new("pkg", "A"));
        let b = pool.add_message(MessageDescriptor::new("pkg", "B"));
        pool.message_mut(a)
            .unwrap()
            .fields
            .push(FieldDescriptor::new("b", FieldKind::Message(b)));
        pool.message_mut(b)
            .unwrap()
            .fields
            .push(FieldDescriptor::new("a", FieldKind::Message(a)));

        let out = flatten_messages(&pool, &[a, b], EnumStyle::ArrayAny);
        assert_eq!(
            names(&out),
            vec![("Pkg", vec!["A", "B"])]
        );
    }

    #[test]
    fn test_groups_by_namespace_in_first_encounter_order() {
        let mut pool = DescriptorPool::new();
        let ts = pool.add_message(MessageDescriptor::new("google.protobuf", "Timestamp"));
        let user = pool.add_message(
            MessageDescriptor::new("api.user.v1", "User")
                .with_field(FieldDescriptor::new("created", FieldKind::Message(ts))),
        );
        let req = pool.add_message(
            MessageDescriptor::new("api.user.v1", "GetUserReply")
                .with_field(FieldDescriptor::new("user", FieldKind::Message(user))),
        );

        let out = flatten_messages(&pool, &[req], EnumStyle::ArrayAny);
        assert_eq!(
            names(&out),
            vec![
                (
                    "ApiUserV1".into(),
                    vec!["GetUserReply", "User"]
                ),
                ("GoogleProtobuf", vec!["Timestamp"]),
            ]
        );
    }

    #[test]
    fn test_fifo_order() {
        let mut pool = DescriptorPool::new();
        let c = pool.add_message(MessageDescriptor::new("p", "C"));
        let d = pool.add_message(MessageDescriptor::new("p", "D"));
        let b = pool.add_message(
            MessageDescriptor::new("p", "B")
                .with_field(FieldDescriptor::new("d", FieldKind::Message(d))),
        );
        let a = pool.add_message(
            MessageDescriptor::new("p", "A")
                .with_field(FieldDescriptor::new("b", FieldKind::Message(b)))
                .with_field(FieldDescriptor::new("c", FieldKind::Message(c))),
        );

        let out = flatten_messages(&pool, &[a], EnumStyle::ArrayAny);
        assert_eq!(
            names(&out),
            vec![(
                "P",
                vec!["A", "B", "C", "D"]
            )]
        );
    }

    #[test]
    fn test_duplicate_key_first_wins() {
        let mut pool = DescriptorPool::new();
        let first = pool.add_message(
            MessageDescriptor::new("p", "M").with_field(FieldDescriptor::new("x", FieldKind::Bool)),
        );
        let second = pool.add_message(
            MessageDescriptor::new("p", "M").with_field(FieldDescriptor::new("y", FieldKind::Int32)),
        );

        let out = flatten_messages(&pool, &[first, second], EnumStyle::ArrayAny);
        assert_eq!(out[0].messages.len(), 1);
        assert_eq!(out[0].messages[0].fields[0].name, "x");
    }

    #[test]
    fn test_map_entries_are_skipped_but_values_followed() {
        let mut pool = DescriptorPool::new();
        let value = pool.add_message(MessageDescriptor::new("p", "Value"));
        let mut entry = MessageDescriptor::new("p", "LabelsEntry");
        entry.map_entry = true;
        entry.fields = vec![
            FieldDescriptor::new("key", FieldKind::String),
            FieldDescriptor::new("value", FieldKind::Message(value)),
        ];
        let entry = pool.add_message(entry);
        let holder = pool.add_message(MessageDescriptor::new("p", "Holder").with_field(
            FieldDescriptor::map(
                "labels",
                Some(entry),
                FieldKind::String,
                FieldKind::Message(value),
            ),
        ));

        let out = flatten_messages(&pool, &[entry, holder], EnumStyle::ArrayAny);
        assert_eq!(
            names(&out),
            vec![("P", vec!["Holder", "Value"])]
        );
        assert_eq!(
            out[0].messages[0].fields[0].ty,
            TsType::map(
                TsType::Primitive(TsPrimitive::String),
                TsType::Ref("P.Value".into())
            )
        );
    }
}
