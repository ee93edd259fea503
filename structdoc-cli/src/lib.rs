//! Documentation outlines for the YAML-tagged structs of a Go module.
//!
//! The module is parsed once into a [`KnowledgeMap`](output::schema::KnowledgeMap)
//! of records, which the renderer then walks to print each selected struct
//! with its nested and embedded structs expanded in place.

pub mod error;
pub mod output;
pub mod pattern;
pub mod scanner;

use output::schema::{KnowledgeMap, RecordDescriptor};

/// Records whose names match `pattern`, in name order; every record when the
/// pattern is empty.
pub fn select<'m>(
    map: &'m KnowledgeMap,
    pattern: &str,
) -> Result<Vec<&'m RecordDescriptor>, error::DocError> {
    if pattern.is_empty() {
        return Ok(map.iter().collect());
    }
    let selected: Vec<_> = map
        .iter()
        .filter(|record| pattern::matches(&record.name, pattern))
        .collect();
    if selected.is_empty() {
        return Err(error::DocError::NoMatches {
            pattern: pattern.to_string(),
        });
    }
    Ok(selected)
}
