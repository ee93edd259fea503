use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub serialization_key: String,
    pub type_literal: String,
    pub is_embedded: bool,
}

impl FieldDescriptor {
    /// Key the field is serialized under: the yaml tag, else the lower-cased name.
    pub fn display_key(&self) -> String {
        if self.serialization_key.is_empty() {
            self.name.to_lowercase()
        } else {
            self.serialization_key.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecordDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub fields: Vec<FieldDescriptor>,
    pub package: String,
    pub source_path: PathBuf,
}

/// Every record found in a module, keyed by unqualified type name.
#[derive(Debug, Default)]
pub struct KnowledgeMap {
    records: BTreeMap<String, RecordDescriptor>,
}

impl KnowledgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later records with the same name replace earlier ones.
    pub fn insert(&mut self, record: RecordDescriptor) -> Option<RecordDescriptor> {
        self.records.insert(record.name.clone(), record)
    }

    pub fn get(&self, name: &str) -> Option<&RecordDescriptor> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = &RecordDescriptor> {
        self.records.values()
    }

    /// Resolve a field type literal to a known record.
    ///
    /// A leading `*` is dropped, then the bare name is looked up. Qualified
    /// `pkg.Type` names fall back to the trailing `Type`.
    pub fn resolve(&self, type_literal: &str) -> Option<&RecordDescriptor> {
        let name = type_literal.strip_prefix('*').unwrap_or(type_literal);
        if let Some(record) = self.records.get(name) {
            return Some(record);
        }
        match name.split_once('.') {
            Some((_, tail)) if !tail.contains('.') => self.records.get(tail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StructDocOutput<'a> {
    pub version: String,
    pub generated_at: String,
    pub root_dir: String,
    pub records: Vec<&'a RecordDescriptor>,
}
