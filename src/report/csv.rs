//! CSV report generation

use crate::report::FileReport;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, results: &[FileReport]) -> io::Result<()> {
    // Header
    writeln!(writer, "filepath,frames,bytes,tag_length,error")?;

    // Rows
    for r in results {
        let tag_length = r
            .tag_length
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());

        writeln!(
            writer,
            "{},{},{},{},{}",
            escape_csv(&r.file_path),
            r.frame_count,
            r.bytes_total,
            tag_length,
            escape_csv(r.error.as_deref().unwrap_or(""))
        )?;
    }

    Ok(())
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
