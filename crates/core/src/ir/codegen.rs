//! Code generation from [`FileIR`] to TypeScript AST.
//!
//! Each file produces two modules: the client module with one request wrapper
//! per binding, and the declaration module with one namespace block per
//! package of reachable messages.

use super::api::{BindingIR, FileIR, MessageIR, NamespaceIR, ServiceIR};
use super::types::{
    BinOp, ObjectEntry, TsExpr, TsFunction, TsImport, TsItem, TsModule, TsNamespace, TsParam,
    TsProp, TsStmt, TsType, TsTypeDef,
};
use crate::config::GeneratorOptions;

/// Line emitted after an empty `//` line for deprecated services and methods.
pub const DEPRECATION_COMMENT: &str = "// Deprecated: Do not use.";

fn header() -> Vec<String> {
    vec![
        "// @ts-ignore".into(),
        "/* eslint-disable */".into(),
        format!("// Code generated by {}. DO NOT EDIT.", crate::GENERATOR_NAME),
    ]
}

fn deprecation_lines() -> Vec<String> {
    vec!["//".into(), DEPRECATION_COMMENT.into()]
}

/// Generate the `<prefix>_service.pb.ts` module.
pub fn codegen_client(file: &FileIR, options: &GeneratorOptions) -> TsModule {
    let mut items = vec![
        TsItem::Const {
            name: "APIService".into(),
            value: TsExpr::Str(options.api_base.clone()),
        },
        TsItem::Raw("type Options = {\n  [key: string]: any;\n};".into()),
    ];
    for service in &file.services {
        items.extend(codegen_service(service, options));
    }

    TsModule {
        header: header(),
        imports: vec![TsImport {
            items: vec!["request".into()],
            from: options.request_module.clone(),
        }],
        items,
    }
}

fn codegen_service(service: &ServiceIR, options: &GeneratorOptions) -> Vec<TsItem> {
    let mut items = Vec::with_capacity(service.bindings.len() + 1);
    if service.deprecated {
        items.push(TsItem::Raw(deprecation_lines().join("\n")));
    }
    items.extend(
        service
            .bindings
            .iter()
            .map(|binding| TsItem::Function(codegen_binding(binding, options))),
    );
    items
}

/// Generate the request wrapper for one binding.
fn codegen_binding(binding: &BindingIR, options: &GeneratorOptions) -> TsFunction {
    let params = TsExpr::ident("params");
    let spread_params = TsExpr::object(vec![ObjectEntry::Spread(params)]);

    let mut entries = vec![ObjectEntry::Prop(
        "method".into(),
        TsExpr::Str(binding.verb.clone()),
    )];
    if binding.has_body() {
        entries.push(ObjectEntry::Prop(
            "headers".into(),
            TsExpr::object(vec![ObjectEntry::Prop(
                "Content-Type".into(),
                TsExpr::Str("application/json".into()),
            )]),
        ));
        entries.push(ObjectEntry::Prop("data".into(), spread_params));
    } else {
        entries.push(ObjectEntry::Prop("params".into(), spread_params));
    }
    entries.push(ObjectEntry::Spread(TsExpr::Paren(Box::new(TsExpr::binary(
        TsExpr::ident("options"),
        BinOp::Or,
        TsExpr::object(vec![]),
    )))));

    let call = TsExpr::Call {
        callee: Box::new(TsExpr::ident("request")),
        type_args: vec![binding.reply.clone()],
        args: vec![
            TsExpr::binary(
                TsExpr::ident("APIService"),
                BinOp::Add,
                TsExpr::Str(binding.path.clone()),
            ),
            TsExpr::Object {
                entries,
                multiline: true,
            },
        ],
    };

    let name = binding.fn_name();
    TsFunction {
        doc: Some(format!("{name} {} {}", binding.comment, options.api_base)),
        name,
        leading_comments: if binding.deprecated {
            deprecation_lines()
        } else {
            Vec::new()
        },
        params: vec![
            TsParam {
                name: "params".into(),
                ty: binding.request.clone(),
                optional: false,
            },
            TsParam {
                name: "options".into(),
                ty: TsType::Ref("Options".into()),
                optional: true,
            },
        ],
        body: vec![TsStmt::Return(call)],
        is_async: true,
        is_export: true,
    }
}

/// Generate the `<prefix>.d.ts` module.
pub fn codegen_declarations(file: &FileIR) -> TsModule {
    TsModule {
        header: header(),
        imports: Vec::new(),
        items: file
            .namespaces
            .iter()
            .map(|ns| TsItem::Namespace(codegen_namespace(ns)))
            .collect(),
    }
}

fn codegen_namespace(ns: &NamespaceIR) -> TsNamespace {
    TsNamespace {
        name: ns.name.clone(),
        types: ns.messages.iter().map(codegen_message).collect(),
    }
}

fn codegen_message(message: &MessageIR) -> TsTypeDef {
    TsTypeDef {
        name: message.name.clone(),
        doc: Some(message.name.clone()),
        props: message
            .fields
            .iter()
            .map(|field| TsProp {
                name: field.name.clone(),
                ty: field.ty.clone(),
                optional: true,
            })
            .collect(),
    }
}
