use std::io::{self, Write};
use std::path::Path;

use super::schema::{RecordDescriptor, StructDocOutput};

pub fn write_json(out: &mut impl Write, root: &Path, records: &[&RecordDescriptor]) -> io::Result<()> {
    let output = StructDocOutput {
        version: "1".to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        root_dir: root.to_string_lossy().to_string(),
        records: records.to_vec(),
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)
}
