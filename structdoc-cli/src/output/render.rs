use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use super::schema::{KnowledgeMap, RecordDescriptor};

/// Writes records as a markdown heading followed by a YAML-like outline.
pub struct Renderer<'m> {
    map: &'m KnowledgeMap,
}

impl<'m> Renderer<'m> {
    pub fn new(map: &'m KnowledgeMap) -> Self {
        Self { map }
    }

    /// Header, description and field outline for `record`, then a blank line.
    pub fn render_record(&self, out: &mut impl Write, record: &'m RecordDescriptor) -> io::Result<()> {
        self.render_header(out, record)?;
        self.render_fields(out, record, 0, &[record.name.as_str()])?;
        writeln!(out)
    }

    pub fn render_header(&self, out: &mut impl Write, record: &RecordDescriptor) -> io::Result<()> {
        writeln!(out, "### {}#{}", cwd_relative(&record.source_path), record.name)?;
        writeln!(out)?;
        if !record.description.is_empty() {
            writeln!(out, "{}", record.description)?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// `path` holds the records already expanded on the way down to `record`.
    fn render_fields(
        &self,
        out: &mut impl Write,
        record: &'m RecordDescriptor,
        level: usize,
        path: &[&'m str],
    ) -> io::Result<()> {
        let indent = "  ".repeat(level);

        for field in &record.fields {
            if !field.description.is_empty() {
                writeln!(out, "{indent}# {}", field.description)?;
            }
            let key = field.display_key();
            writeln!(out, "{indent}{key}: <{}>", field.type_literal)?;

            let (element, list_item) = match field.type_literal.strip_prefix("[]") {
                Some(elem) => (elem, true),
                None => (field.type_literal.as_str(), false),
            };
            let Some(nested) = self.map.resolve(element).filter(|r| !r.fields.is_empty()) else {
                continue;
            };

            if path.contains(&nested.name.as_str()) {
                writeln!(out, "{indent}  # (recursive reference to {})", nested.name)?;
                continue;
            }
            if list_item {
                writeln!(out, "{indent}-")?;
            }
            let mut next = path.to_vec();
            next.push(&nested.name);
            self.render_fields(out, nested, level + 1, &next)?;
        }
        Ok(())
    }
}

/// `path` relative to the working directory, climbing with `..` as needed.
fn cwd_relative(path: &Path) -> String {
    match std::env::current_dir() {
        Ok(cwd) if path.is_absolute() => relative_to(path, &cwd).display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Both paths are expected to be absolute.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path: Vec<Component> = path.components().collect();
    let base: Vec<Component> = base.components().collect();
    let shared = path.iter().zip(&base).take_while(|(a, b)| a == b).count();

    // Different roots (another drive on Windows) have nothing to climb to.
    if shared == 0 {
        return path.iter().collect();
    }

    let mut relative: PathBuf = base[shared..].iter().map(|_| Component::ParentDir).collect();
    relative.extend(&path[shared..]);
    relative
}
