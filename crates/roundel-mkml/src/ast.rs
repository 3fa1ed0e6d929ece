use std::fmt;

/// Unit suffix of a dimension literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Device pixels: `12px`
    Px,
    /// Density-independent pixels: `12dp` (also `12dip`)
    Dp,
    /// Scale-independent pixels: `12sp`
    Sp,
}

impl Unit {
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "px" => Some(Unit::Px),
            "dp" | "dip" => Some(Unit::Dp),
            "sp" => Some(Unit::Sp),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Px => "px",
            Unit::Dp => "dp",
            Unit::Sp => "sp",
        })
    }
}

/// A literal value in a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string: `"hello"`
    Str(String),
    /// Unitless number: `16.0` or `16`
    Number(f32),
    /// Number with a unit suffix: `10dp`
    Dimension(f32, Unit),
    /// Unquoted identifier: resource names, style names, enum variants
    Ident(String),
}

impl Value {
    /// Short name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Number(_) => "number",
            Value::Dimension(..) => "dimension",
            Value::Ident(_) => "identifier",
        }
    }
}

/// A single `key: value` property inside a widget block.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub key: String,
    pub value: Value,
}

/// A widget instantiation node in the tree.
///
/// ```mkml
/// CircleImageView {
///     radius: 12dp
///     src: avatar
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Widget type name or component alias.
    pub widget: String,
    /// Properties inside the block, in source order.
    pub props: Vec<Prop>,
    /// Nested child nodes.
    pub children: Vec<Node>,
}

impl Node {
    /// A node with no properties or children yet.
    pub fn new(widget: impl Into<String>) -> Self {
        Self { widget: widget.into(), props: Vec::new(), children: Vec::new() }
    }

    /// Look up a property value by key. The last occurrence wins.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.iter().rev().find(|p| p.key == key).map(|p| &p.value)
    }

    /// Get a property as `&str` if it is a `Str` or `Ident`.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            Value::Str(s) | Value::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// `import "path/to/file.mkml" as Alias`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub path: String,
    pub alias: String,
}

/// The top-level parse result for a `.mkml` source file.
#[derive(Debug, Clone, PartialEq)]
pub struct DslDocument {
    pub imports: Vec<Import>,
    pub root: Node,
}
