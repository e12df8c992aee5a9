//! Descriptor file → [`FileIR`].
//!
//! All schema-specific decisions happen here: binding resolution, graph
//! flattening, type mapping and comment cleanup. Codegen never looks at the
//! descriptor pool.

use super::api::{BindingIR, FileIR, ServiceIR};
use super::binding::{OrdinalCounter, resolve_method};
use super::flatten::flatten_messages;
use super::type_ref::message_ref_type;
use super::utils::flatten_comment;
use crate::config::GeneratorOptions;
use crate::descriptor::{DescriptorPool, FileDescriptor, ServiceDescriptor};

/// Normalize one file. Files without services yield `None`.
pub fn normalize_file(
    pool: &DescriptorPool,
    file: &FileDescriptor,
    options: &GeneratorOptions,
    ordinals: &mut OrdinalCounter,
) -> Option<FileIR> {
    if file.services.is_empty() {
        return None;
    }

    let services = file
        .services
        .iter()
        .map(|service| normalize_service(pool, service, ordinals))
        .collect();

    Some(FileIR {
        prefix: file.generated_filename_prefix().to_string(),
        services,
        namespaces: flatten_messages(pool, &file.messages, options.enum_style),
    })
}

fn normalize_service(
    pool: &DescriptorPool,
    service: &ServiceDescriptor,
    ordinals: &mut OrdinalCounter,
) -> ServiceIR {
    let mut bindings = Vec::new();
    for method in &service.methods {
        let request = message_ref_type(pool, &method.input);
        let reply = message_ref_type(pool, &method.output);
        let comment = flatten_comment(&method.leading_comments);
        for resolved in resolve_method(&service.full_name, method, ordinals) {
            bindings.push(BindingIR {
                method: method.name.clone(),
                ordinal: resolved.ordinal,
                comment: comment.clone(),
                deprecated: method.deprecated,
                verb: resolved.verb,
                path: resolved.path,
                path_vars: resolved.path_vars,
                body: resolved.body,
                response_body: resolved.response_body,
                request: request.clone(),
                reply: reply.clone(),
            });
        }
    }

    ServiceIR {
        full_name: service.full_name.clone(),
        deprecated: service.deprecated,
        bindings,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::descriptor::{
        FieldDescriptor, FieldKind, HttpPattern, HttpRule, MessageDescriptor, MessageRef,
        MethodDescriptor,
    };
    use crate::ir::types::TsType;

    fn user_file() -> (DescriptorPool, FileDescriptor) {
        let mut pool = DescriptorPool::new();
        let shared = pool.add_message(MessageDescriptor::new("common.v1", "Page"));
        let request = pool.add_message(
            MessageDescriptor::new("api.user.v1", "ListUsersRequest")
                .with_field(FieldDescriptor::new("page", FieldKind::Message(shared))),
        );
        let reply = pool.add_message(MessageDescriptor::new("api.user.v1", "ListUsersReply"));
        let rule = HttpRule::new(HttpPattern::Get("/v1/users".into()))
            .with_binding(HttpRule::new(HttpPattern::Post("/v1/users:search".into())).with_body("*"));
        let file = FileDescriptor {
            name: "api/user/v1/user.proto".into(),
            package: "api.user.v1".into(),
            messages: vec![request, reply],
            services: vec![ServiceDescriptor {
                name: "UserService".into(),
                full_name: "api.user.v1.UserService".into(),
                deprecated: false,
                methods: vec![MethodDescriptor {
                    name: "ListUsers".into(),
                    input: MessageRef::resolved(&pool, request),
                    output: MessageRef::resolved(&pool, reply),
                    leading_comments: " List users\n page by page\n".into(),
                    deprecated: true,
                    http: Some(rule),
                }],
            }],
        };
        (pool, file)
    }

    #[test]
    fn test_file_without_services_is_skipped() {
        let pool = DescriptorPool::new();
        let file = FileDescriptor {
            name: "a.proto".into(),
            ..FileDescriptor::default()
        };
        let mut ordinals = OrdinalCounter::new();
        assert!(normalize_file(&pool, &file, &GeneratorOptions::default(), &mut ordinals).is_none());
    }

    #[test]
    fn test_normalize_file() {
        let (pool, file) = user_file();
        let mut ordinals = OrdinalCounter::new();
        let ir = normalize_file(&pool, &file, &GeneratorOptions::default(), &mut ordinals).unwrap();

        assert_eq!(ir.prefix, "api/user/v1/user");
        let bindings = &ir.services[0].bindings;
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].fn_name(), "ListUsers");
        assert_eq!(bindings[0].verb, "POST");
        assert!(bindings[0].has_body());
        assert_eq!(bindings[1].fn_name(), "ListUsers1");
        assert_eq!(bindings[1].verb, "GET");
        assert!(!bindings[1].has_body());
        assert!(bindings.iter().all(|b| b.deprecated));
        assert_eq!(bindings[0].comment, " List users page by page");
        assert_eq!(bindings[0].request, TsType::Ref("ApiUserV1.ListUsersRequest".into()));
        assert_eq!(bindings[0].reply, TsType::Ref("ApiUserV1.ListUsersReply".into()));

        let namespaces: Vec<_> = ir.namespaces.iter().map(|ns| ns.name.as_str()).collect();
        assert_eq!(namespaces, vec!["ApiUserV1", "CommonV1"]);
    }

    #[test]
    fn test_ordinals_continue_across_files() {
        let (pool, file) = user_file();
        let mut ordinals = OrdinalCounter::new();
        let options = GeneratorOptions::default();
        let _ = normalize_file(&pool, &file, &options, &mut ordinals);
        let second = normalize_file(&pool, &file, &options, &mut ordinals).unwrap();
        let names: Vec<_> = second.services[0]
            .bindings
            .iter()
            .map(BindingIR::fn_name)
            .collect();
        assert_eq!(names, vec!["ListUsers2", "ListUsers3"]);
    }
}
