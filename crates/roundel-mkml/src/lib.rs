//! Lexer, parser, and AST for the **Roundel markup language** (`.mkml`).
//!
//! Markup carries the declarative style attributes of widgets. The crate is
//! dependency-free.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `DslDocument`, `Node`, `Prop`, `Value`, `Unit`, `Import` |
//! | [`error`] | `ParseError`, `ErrorKind` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point, nesting limit |
//!
//! ```rust
//! use roundel_mkml::parse_str;
//! use roundel_mkml::ast::{Unit, Value};
//!
//! let doc = parse_str("CircleImageView { radius: 12dp  src: avatar }").unwrap();
//! assert_eq!(doc.root.widget, "CircleImageView");
//! assert_eq!(doc.root.prop("radius"), Some(&Value::Dimension(12.0, Unit::Dp)));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::DslDocument;
pub use error::{ErrorKind, ParseError};
pub use parser::parse_str;
