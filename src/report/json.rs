//! JSON report generation

use crate::error::Result;
use crate::report::{FileReport, Summary};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: Summary,
    files: &'a [FileReport],
}

pub fn write<W: Write>(writer: &mut W, results: &[FileReport]) -> Result<()> {
    let report = JsonReport {
        generated: chrono::Utc::now().to_rfc3339(),
        summary: Summary::from_results(results),
        files: results,
    };

    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let results = vec![
            FileReport {
                file_path: "x/a.mp3".to_string(),
                file_name: "a.mp3".to_string(),
                frame_count: 7,
                bytes_total: 3000,
                tag_length: Some(10),
                error: None,
            },
            FileReport::failed("b.mp3", "unreadable"),
        ];

        let mut out = Vec::new();
        write(&mut out, &results).expect("serialize");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");

        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["summary"]["frames"], 7);
        assert_eq!(value["files"][0]["frame_count"], 7);
        assert_eq!(value["files"][0]["tag_length"], 10);
        assert_eq!(value["files"][1]["error"], "unreadable");
        assert!(value["generated"].is_string());
    }
}
