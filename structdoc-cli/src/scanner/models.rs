use regex::Regex;
use std::sync::LazyLock;

use crate::output::schema::{FieldDescriptor, KnowledgeMap, RecordDescriptor};

use super::syntax::{FieldDecl, SyntaxFile, TypeExpr};

static YAML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"yaml:"([^"]+)""#).unwrap());

/// Add a record for every type declared in `file`, replacing same-named ones.
pub fn collect_records(file: &SyntaxFile, map: &mut KnowledgeMap) -> usize {
    for decl in &file.types {
        let raw = join_doc([decl.group_doc.as_slice(), decl.spec_doc.as_slice()]);
        let fields = match &decl.ty {
            TypeExpr::Struct(fields) => fields.iter().flat_map(expand_field).collect(),
            _ => Vec::new(),
        };

        let record = RecordDescriptor {
            name: decl.name.clone(),
            description: clean_doc(&decl.name, &raw),
            fields,
            package: file.package.clone(),
            source_path: file.path.clone(),
        };
        if let Some(previous) = map.insert(record) {
            tracing::debug!(
                name = %decl.name,
                replaced = %previous.source_path.display(),
                "duplicate type name, keeping the later declaration"
            );
        }
    }
    file.types.len()
}

fn expand_field(field: &FieldDecl) -> Vec<FieldDescriptor> {
    let description = join_doc([field.doc.as_slice()]);
    let serialization_key = field.tag.as_deref().map(yaml_key).unwrap_or_default();
    let type_literal = type_literal(&field.ty);

    if field.names.is_empty() {
        return vec![FieldDescriptor {
            name: embedded_name(&type_literal),
            description,
            serialization_key,
            type_literal,
            is_embedded: true,
        }];
    }

    field
        .names
        .iter()
        .map(|name| FieldDescriptor {
            name: name.clone(),
            description: description.clone(),
            serialization_key: serialization_key.clone(),
            type_literal: type_literal.clone(),
            is_embedded: false,
        })
        .collect()
}

/// Render a declared type the way it reads in source, for the forms we track.
pub fn type_literal(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Ident(name) => name.clone(),
        TypeExpr::Pointer(inner) => format!("*{}", type_literal(inner)),
        TypeExpr::Slice(elem) => format!("[]{}", type_literal(elem)),
        TypeExpr::Qualified { package, name } => format!("{package}.{name}"),
        TypeExpr::Struct(_) | TypeExpr::Other => "unknown".to_string(),
    }
}

/// Key from a `yaml:"key,opts"` segment, empty when there is none.
pub fn yaml_key(tag: &str) -> String {
    YAML_TAG
        .captures(tag)
        .and_then(|cap| cap[1].split(',').next().map(str::to_string))
        .unwrap_or_default()
}

fn embedded_name(type_literal: &str) -> String {
    let bare = type_literal.strip_prefix('*').unwrap_or(type_literal);
    bare.rsplit('.').next().unwrap_or(bare).to_lowercase()
}

/// Strip comment delimiters, drop blank lines and join what is left with spaces.
fn join_doc<'a>(groups: impl IntoIterator<Item = &'a [String]>) -> String {
    groups
        .into_iter()
        .flatten()
        .flat_map(|comment| strip_comment(comment).lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("//") {
        return rest.trim();
    }
    line.strip_prefix("/*")
        .and_then(|rest| rest.strip_suffix("*/"))
        .map_or(line, str::trim)
}

/// Drop a leading repeat of the type name when a capitalized word follows it,
/// as in `// Config Holds the settings`.
pub fn clean_doc(name: &str, doc: &str) -> String {
    let doc = doc.trim();
    if let Some(rest) = doc.strip_prefix(name) {
        let trimmed = rest.trim_start();
        if trimmed.starts_with(|c: char| c.is_ascii_uppercase()) {
            return trimmed.to_string();
        }
    }
    doc.to_string()
}
