//! TypeScript code emission via the Emit trait.
//!
//! Every AST node renders itself; nodes that can span several lines also take
//! an indentation level (two spaces per level).

use super::types::{
    BinOp, ObjectEntry, TsExpr, TsFunction, TsImport, TsItem, TsModule, TsNamespace, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef,
};
use super::utils::{escape_single_quoted, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Any => "any",
        }
        .to_string()
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => format!("Array<{}>", inner.emit()),
            TsType::Map { key, value } => format!("Map<{}, {}>", key.emit(), value.emit()),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{opt}: {}", quote_if_needed(&self.name), self.ty.emit())
    }
}

impl TsTypeDef {
    /// Emit as `<keyword> Name = { ... };` at the given indentation.
    pub fn emit_indented(&self, keyword: &str, level: usize) -> String {
        let prefix = indent(level);
        let mut output = String::new();
        if let Some(doc) = &self.doc {
            output.push_str(&format!("{prefix}/** {doc} */\n"));
        }
        if self.props.is_empty() {
            output.push_str(&format!("{prefix}{keyword} {} = {{}};\n", self.name));
            return output;
        }
        output.push_str(&format!("{prefix}{keyword} {} = {{\n", self.name));
        let inner = indent(level + 1);
        for prop in &self.props {
            output.push_str(&format!("{inner}{};\n", prop.emit()));
        }
        output.push_str(&format!("{prefix}}};\n"));
        output
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        self.emit_indented("type", 0)
    }
}

impl Emit for TsNamespace {
    fn emit(&self) -> String {
        if self.name.is_empty() {
            return self
                .types
                .iter()
                .map(|t| t.emit_indented("declare type", 0))
                .collect();
        }
        let mut output = format!("declare namespace {} {{\n", self.name);
        for ty in &self.types {
            output.push_str(&ty.emit_indented("type", 1));
        }
        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::Add => "+",
            BinOp::Or => "||",
        }
        .to_string()
    }
}

impl TsExpr {
    /// Emit with multiline object literals laid out at the given indentation.
    pub fn emit_indented(&self, level: usize) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Str(s) => format!("'{}'", escape_single_quoted(s)),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let type_args = if type_args.is_empty() {
                    String::new()
                } else {
                    let parts: Vec<_> = type_args.iter().map(|t| t.emit()).collect();
                    format!("<{}>", parts.join(", "))
                };
                let args: Vec<_> = args.iter().map(|a| a.emit_indented(level)).collect();
                format!(
                    "{}{type_args}({})",
                    callee.emit_indented(level),
                    args.join(", ")
                )
            }
            TsExpr::Object { entries, multiline } => {
                if entries.is_empty() {
                    return "{}".to_string();
                }
                if *multiline {
                    let inner = indent(level + 1);
                    let mut output = "{\n".to_string();
                    for entry in entries {
                        output.push_str(&format!("{inner}{},\n", entry.emit_indented(level + 1)));
                    }
                    output.push_str(&format!("{}}}", indent(level)));
                    output
                } else {
                    let parts: Vec<_> = entries.iter().map(|e| e.emit_indented(level)).collect();
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            TsExpr::Binary { left, op, right } => format!(
                "{} {} {}",
                left.emit_indented(level),
                op.emit(),
                right.emit_indented(level)
            ),
            TsExpr::Paren(inner) => format!("({})", inner.emit_indented(level)),
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        self.emit_indented(0)
    }
}

impl ObjectEntry {
    fn emit_indented(&self, level: usize) -> String {
        match self {
            ObjectEntry::Prop(key, value) => {
                format!("{}: {}", quote_if_needed(key), value.emit_indented(level))
            }
            ObjectEntry::Spread(value) => format!("...{}", value.emit_indented(level)),
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{opt}: {}", self.name, self.ty.emit())
    }
}

// =============================================================================
// Statements
// =============================================================================

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, level: usize) -> String {
        let prefix = indent(level);
        match self {
            TsStmt::Return(expr) => format!("{prefix}return {};\n", expr.emit_indented(level)),
            TsStmt::Raw(code) => code
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        "\n".to_string()
                    } else {
                        format!("{prefix}{line}\n")
                    }
                })
                .collect(),
        }
    }
}

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

// =============================================================================
// Functions
// =============================================================================

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let mut output = String::new();
        for comment in &self.leading_comments {
            output.push_str(comment);
            output.push('\n');
        }
        if let Some(doc) = &self.doc {
            output.push_str(&format!("/** {doc} */\n"));
        }
        let export = if self.is_export { "export " } else { "" };
        let async_kw = if self.is_async { "async " } else { "" };
        let params: Vec<_> = self.params.iter().map(|p| p.emit()).collect();
        output.push_str(&format!(
            "{export}{async_kw}function {}({}) {{\n",
            self.name,
            params.join(", ")
        ));
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(1));
        }
        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        format!(
            "import {{ {} }} from '{}';\n",
            self.items.join(", "),
            escape_single_quoted(&self.from)
        )
    }
}

impl Emit for TsItem {
    fn emit(&self) -> String {
        match self {
            TsItem::Const { name, value } => format!("const {name} = {};\n", value.emit()),
            TsItem::Raw(code) => {
                let mut code = code.clone();
                if !code.ends_with('\n') {
                    code.push('\n');
                }
                code
            }
            TsItem::Function(func) => func.emit(),
            TsItem::Namespace(ns) => ns.emit(),
        }
    }
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut sections: Vec<String> = Vec::new();
        if !self.header.is_empty() {
            sections.push(self.header.iter().map(|line| format!("{line}\n")).collect());
        }
        if !self.imports.is_empty() {
            sections.push(self.imports.iter().map(Emit::emit).collect());
        }
        sections.extend(self.items.iter().map(Emit::emit));
        sections.join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn prop(name: &str, ty: TsType) -> TsProp {
        TsProp {
            name: name.into(),
            ty,
            optional: true,
        }
    }

    #[test]
    fn test_emit_types() {
        assert_eq!(TsType::Primitive(TsPrimitive::Any).emit(), "any");
        assert_eq!(
            TsType::array(TsType::Primitive(TsPrimitive::Number)).emit(),
            "Array<number>"
        );
        assert_eq!(
            TsType::map(
                TsType::Primitive(TsPrimitive::String),
                TsType::array(TsType::Ref("A.B".into()))
            )
            .emit(),
            "Map<string, Array<A.B>>"
        );
    }

    #[test]
    fn test_emit_prop_quotes_odd_names() {
        assert_eq!(
            prop("user_id", TsType::Primitive(TsPrimitive::Number)).emit(),
            "user_id?: number"
        );
        assert_eq!(
            prop("@type", TsType::Primitive(TsPrimitive::String)).emit(),
            "'@type'?: string"
        );
    }

    #[test]
    fn test_emit_namespace() {
        let ns = TsNamespace {
            name: "HelloworldV1".into(),
            types: vec![
                TsTypeDef {
                    name: "HelloRequest".into(),
                    doc: Some("HelloRequest".into()),
                    props: vec![prop("name", TsType::Primitive(TsPrimitive::String))],
                },
                TsTypeDef {
                    name: "Empty".into(),
                    doc: None,
                    props: vec![],
                },
            ],
        };
        assert_eq!(
            ns.emit(),
            "declare namespace HelloworldV1 {\n  /** HelloRequest */\n  type HelloRequest = {\n    name?: string;\n  };\n  type Empty = {};\n}\n"
        );
    }

    #[test]
    fn test_emit_namespace_without_name() {
        let ns = TsNamespace {
            name: String::new(),
            types: vec![TsTypeDef {
                name: "Ping".into(),
                doc: None,
                props: vec![prop("at", TsType::Primitive(TsPrimitive::Number))],
            }],
        };
        assert_eq!(ns.emit(), "declare type Ping = {\n  at?: number;\n};\n");
    }

    #[test]
    fn test_emit_call_with_multiline_object() {
        let call = TsExpr::Call {
            callee: Box::new(TsExpr::ident("request")),
            type_args: vec![TsType::Ref("A.Reply".into())],
            args: vec![
                TsExpr::binary(TsExpr::ident("APIService"), BinOp::Add, TsExpr::Str("/v1".into())),
                TsExpr::Object {
                    entries: vec![
                        ObjectEntry::Prop("method".into(), TsExpr::Str("GET".into())),
                        ObjectEntry::Spread(TsExpr::Paren(Box::new(TsExpr::binary(
                            TsExpr::ident("options"),
                            BinOp::Or,
                            TsExpr::object(vec![]),
                        )))),
                    ],
                    multiline: true,
                },
            ],
        };
        assert_eq!(
            TsStmt::Return(call).emit_indented(1),
            "  return request<A.Reply>(APIService + '/v1', {\n    method: 'GET',\n    ...(options || {}),\n  });\n"
        );
    }

    #[test]
    fn test_emit_inline_object() {
        let obj = TsExpr::object(vec![
            ObjectEntry::Prop("Content-Type".into(), TsExpr::Str("application/json".into())),
        ]);
        assert_eq!(obj.emit(), "{ 'Content-Type': 'application/json' }");
    }

    #[test]
    fn test_emit_string_escapes_quotes() {
        assert_eq!(TsExpr::Str("it's".into()).emit(), "'it\\'s'");
    }

    #[test]
    fn test_emit_raw_stmt() {
        assert_eq!(TsStmt::Raw("a;\n\nb;".into()).emit(), "  a;\n\n  b;\n");
    }

    #[test]
    fn test_emit_function() {
        let func = TsFunction {
            name: "SayHello".into(),
            leading_comments: vec!["//".into(), "// Deprecated: Do not use.".into()],
            doc: Some("SayHello  /api".into()),
            params: vec![
                TsParam {
                    name: "params".into(),
                    ty: TsType::Ref("A.Req".into()),
                    optional: false,
                },
                TsParam {
                    name: "options".into(),
                    ty: TsType::Ref("Options".into()),
                    optional: true,
                },
            ],
            body: vec![TsStmt::Return(TsExpr::ident("x"))],
            is_async: true,
            is_export: true,
        };
        assert_eq!(
            func.emit(),
            "//\n// Deprecated: Do not use.\n/** SayHello  /api */\nexport async function SayHello(params: A.Req, options?: Options) {\n  return x;\n}\n"
        );
    }

    #[test]
    fn test_emit_module_sections() {
        let module = TsModule {
            header: vec!["// @ts-ignore".into()],
            imports: vec![TsImport {
                items: vec!["request".into()],
                from: "umi".into(),
            }],
            items: vec![
                TsItem::Const {
                    name: "APIService".into(),
                    value: TsExpr::Str("/api".into()),
                },
                TsItem::Raw("type Options = {\n  [key: string]: any;\n};".into()),
            ],
        };
        assert_eq!(
            module.emit(),
            "// @ts-ignore\n\nimport { request } from 'umi';\n\nconst APIService = '/api';\n\ntype Options = {\n  [key: string]: any;\n};\n"
        );
    }
}
