//! TypeScript AST for the two generated artifacts.
//!
//! - [`TsType`]: type expressions (`string`, `Array<T>`, `Map<K, V>`, `Ns.Name`)
//! - [`TsExpr`]: the handful of expression forms a request wrapper needs
//! - [`TsFunction`], [`TsNamespace`], [`TsItem`]: module-level items
//! - [`TsModule`]: one complete output file

/// TypeScript primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `any`
    Any,
}

/// TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// A primitive.
    Primitive(TsPrimitive),
    /// `Array<T>`
    Array(Box<TsType>),
    /// `Map<K, V>`
    Map {
        /// Key type.
        key: Box<TsType>,
        /// Value type.
        value: Box<TsType>,
    },
    /// Named reference, possibly namespace-qualified: `HelloworldV1.HelloReply`.
    Ref(String),
}

impl TsType {
    /// `Array<inner>`
    pub fn array(inner: TsType) -> Self {
        TsType::Array(Box::new(inner))
    }

    /// `Map<key, value>`
    pub fn map(key: TsType, value: TsType) -> Self {
        TsType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Reference to `name` inside `namespace`; a bare name when the namespace is empty.
    pub fn qualified(namespace: &str, name: &str) -> Self {
        if namespace.is_empty() {
            TsType::Ref(name.to_string())
        } else {
            TsType::Ref(format!("{namespace}.{name}"))
        }
    }
}

/// Property of a structural type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProp {
    /// Property key as it appears on the wire.
    pub name: String,
    /// Property type.
    pub ty: TsType,
    /// Rendered with `?`.
    pub optional: bool,
}

/// `type Name = { ... };` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsTypeDef {
    /// Type name.
    pub name: String,
    /// Single-line doc comment placed above the declaration.
    pub doc: Option<String>,
    /// Properties in declaration order.
    pub props: Vec<TsProp>,
}

/// `declare namespace Name { ... }` block. An empty name declares the types at
/// the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsNamespace {
    /// Namespace identifier.
    pub name: String,
    /// Type declarations in order.
    pub types: Vec<TsTypeDef>,
}

/// Binary operators used by generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `||`
    Or,
}

/// TypeScript expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsExpr {
    /// Identifier: `params`
    Ident(String),
    /// Single-quoted string literal.
    Str(String),
    /// Call with optional type arguments: `request<T>(a, b)`
    Call {
        /// Called expression.
        callee: Box<TsExpr>,
        /// Explicit type arguments.
        type_args: Vec<TsType>,
        /// Call arguments.
        args: Vec<TsExpr>,
    },
    /// Object literal.
    Object {
        /// Entries in order.
        entries: Vec<ObjectEntry>,
        /// One entry per line, with a trailing comma after each.
        multiline: bool,
    },
    /// Binary operation: `a + b`
    Binary {
        /// Left operand.
        left: Box<TsExpr>,
        /// Operator.
        op: BinOp,
        /// Right operand.
        right: Box<TsExpr>,
    },
    /// Parenthesized expression: `(a || {})`
    Paren(Box<TsExpr>),
}

impl TsExpr {
    /// Identifier expression.
    pub fn ident(name: &str) -> Self {
        TsExpr::Ident(name.to_string())
    }

    /// Single-line object literal.
    pub fn object(entries: Vec<ObjectEntry>) -> Self {
        TsExpr::Object {
            entries,
            multiline: false,
        }
    }

    /// `left op right`
    pub fn binary(left: TsExpr, op: BinOp, right: TsExpr) -> Self {
        TsExpr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Entry of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectEntry {
    /// `key: value`
    Prop(String, TsExpr),
    /// `...value`
    Spread(TsExpr),
}

/// Function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsParam {
    /// Parameter name.
    pub name: String,
    /// Type annotation.
    pub ty: TsType,
    /// Rendered with `?`.
    pub optional: bool,
}

/// Statement in a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsStmt {
    /// `return expr;`
    Return(TsExpr),
    /// Raw line(s), indented as a block.
    Raw(String),
}

/// Function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsFunction {
    /// Function name.
    pub name: String,
    /// Line comments placed before the doc comment, markers included.
    pub leading_comments: Vec<String>,
    /// Single-line `/** ... */` doc comment.
    pub doc: Option<String>,
    /// Parameters.
    pub params: Vec<TsParam>,
    /// Body statements.
    pub body: Vec<TsStmt>,
    /// `async function`
    pub is_async: bool,
    /// `export function`
    pub is_export: bool,
}

/// Module-level item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsItem {
    /// `const name = value;`
    Const {
        /// Binding name.
        name: String,
        /// Initializer.
        value: TsExpr,
    },
    /// Verbatim code.
    Raw(String),
    /// Function declaration.
    Function(TsFunction),
    /// Namespace declaration block.
    Namespace(TsNamespace),
}

/// `import { a, b } from 'module';`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Imported names.
    pub items: Vec<String>,
    /// Module specifier.
    pub from: String,
}

/// Complete TypeScript output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsModule {
    /// Comment lines at the very top of the file, markers included.
    pub header: Vec<String>,
    /// Import declarations.
    pub imports: Vec<TsImport>,
    /// Items, separated by blank lines when emitted.
    pub items: Vec<TsItem>,
}
