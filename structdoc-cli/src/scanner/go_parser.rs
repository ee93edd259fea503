use std::path::Path;
use tree_sitter::{Language, Node, Parser};

use crate::error::ParseError;

use super::file_walker;
use super::syntax::{FieldDecl, SourceParser, SyntaxFile, TypeDecl, TypeExpr};

/// Parses Go sources with tree-sitter.
#[derive(Debug, Default)]
pub struct TreeSitterGo;

impl SourceParser for TreeSitterGo {
    fn parse_module(&self, module_dir: &Path) -> Result<Vec<SyntaxFile>, ParseError> {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;

        let mut files = Vec::new();
        for path in file_walker::walk_module(module_dir)? {
            let content = std::fs::read_to_string(&path).map_err(|source| ParseError::Read {
                path: path.clone(),
                source,
            })?;
            let tree = parser
                .parse(&content, None)
                .ok_or_else(|| ParseError::Aborted { path: path.clone() })?;

            let syntax = extract_file(tree.root_node(), content.as_bytes(), &path);
            tracing::trace!(
                file = %path.display(),
                types = syntax.types.len(),
                "parsed source file"
            );
            files.push(syntax);
        }
        Ok(files)
    }
}

/// Read the package clause and every top-level type declaration.
pub fn extract_file(root: Node, source: &[u8], path: &Path) -> SyntaxFile {
    let mut package = String::new();
    let mut types = Vec::new();

    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "package_clause" => {
                if let Some(ident) = first_named_of_kind(node, "package_identifier") {
                    package = text(ident, source);
                }
            }
            "type_declaration" => {
                let group_doc = leading_comments(node, source);
                let mut inner = node.walk();
                for spec in node.named_children(&mut inner) {
                    if !matches!(spec.kind(), "type_spec" | "type_alias") {
                        continue;
                    }
                    let Some(name) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    types.push(TypeDecl {
                        name: text(name, source),
                        group_doc: group_doc.clone(),
                        spec_doc: leading_comments(spec, source),
                        ty: spec
                            .child_by_field_name("type")
                            .map_or(TypeExpr::Other, |ty| type_expr(ty, source)),
                    });
                }
            }
            _ => {}
        }
    }

    SyntaxFile {
        path: path.to_path_buf(),
        package,
        types,
    }
}

fn type_expr(node: Node, source: &[u8]) -> TypeExpr {
    match node.kind() {
        "type_identifier" | "identifier" => TypeExpr::Ident(text(node, source)),
        "pointer_type" => match last_named_child(node) {
            Some(inner) => TypeExpr::Pointer(Box::new(type_expr(inner, source))),
            None => TypeExpr::Other,
        },
        "slice_type" | "array_type" | "implicit_length_array_type" => {
            match node.child_by_field_name("element") {
                Some(elem) => TypeExpr::Slice(Box::new(type_expr(elem, source))),
                None => TypeExpr::Other,
            }
        }
        "qualified_type" => {
            match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(package), Some(name)) => TypeExpr::Qualified {
                    package: text(package, source),
                    name: text(name, source),
                },
                _ => TypeExpr::Other,
            }
        }
        "struct_type" => TypeExpr::Struct(struct_fields(node, source)),
        _ => TypeExpr::Other,
    }
}

fn struct_fields(node: Node, source: &[u8]) -> Vec<FieldDecl> {
    let Some(list) = first_named_of_kind(node, "field_declaration_list") else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    let mut cursor = list.walk();
    for decl in list.named_children(&mut cursor) {
        if decl.kind() != "field_declaration" {
            continue;
        }
        let mut names_cursor = decl.walk();
        let names: Vec<String> = decl
            .children_by_field_name("name", &mut names_cursor)
            .map(|n| text(n, source))
            .collect();

        let mut ty = decl
            .child_by_field_name("type")
            .map_or(TypeExpr::Other, |t| type_expr(t, source));
        // Embedded `*T` keeps its star as a bare token beside the type.
        if names.is_empty() && has_token(decl, "*") {
            ty = TypeExpr::Pointer(Box::new(ty));
        }

        fields.push(FieldDecl {
            names,
            doc: leading_comments(decl, source),
            tag: decl.child_by_field_name("tag").map(|t| text(t, source)),
            ty,
        });
    }
    fields
}

/// Comment lines directly above `node` with no blank line in between.
///
/// A comment sharing a line with earlier code belongs to that code and ends
/// the block.
fn leading_comments(node: Node, source: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut next_row = node.start_position().row;
    let mut prev = node.prev_sibling();

    while let Some(sibling) = prev {
        if sibling.kind() != "comment" || sibling.end_position().row + 1 != next_row {
            break;
        }
        let trailing = sibling.prev_sibling().is_some_and(|p| {
            !matches!(p.kind(), "comment" | "\n")
                && p.end_position().row == sibling.start_position().row
        });
        if trailing {
            break;
        }
        lines.push(text(sibling, source));
        next_row = sibling.start_position().row;
        prev = sibling.prev_sibling();
    }

    lines.reverse();
    lines
}

fn first_named_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn last_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let last = node.named_children(&mut cursor).last();
    last
}

fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| !c.is_named() && c.kind() == token);
    found
}

fn text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or_default().to_string()
}
