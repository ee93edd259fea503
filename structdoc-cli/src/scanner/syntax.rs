//! Parser-independent view of Go type declarations.
//!
//! A [`SourceParser`] turns a module directory into [`SyntaxFile`]s; the
//! knowledge map builder only ever sees these types, so it can be driven by
//! hand-built syntax in tests.

use std::path::{Path, PathBuf};

use crate::error::ParseError;

/// Shape of a declared type, reduced to the forms the builder distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Name`
    Ident(String),
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T` or `[N]T`
    Slice(Box<TypeExpr>),
    /// `pkg.Name`
    Qualified { package: String, name: String },
    /// `struct { ... }`
    Struct(Vec<FieldDecl>),
    /// Maps, channels, functions, interfaces, generics and the rest.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Empty for embedded fields.
    pub names: Vec<String>,
    /// Leading comment lines, delimiters included.
    pub doc: Vec<String>,
    /// Raw tag literal including its quotes.
    pub tag: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Comment above the `type` keyword.
    pub group_doc: Vec<String>,
    /// Comment above the spec inside a `type ( ... )` group.
    pub spec_doc: Vec<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFile {
    pub path: PathBuf,
    pub package: String,
    pub types: Vec<TypeDecl>,
}

/// Produces syntax for every source file of the module rooted at a directory.
pub trait SourceParser {
    fn parse_module(&self, module_dir: &Path) -> Result<Vec<SyntaxFile>, ParseError>;
}
