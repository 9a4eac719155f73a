use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::MalformedRecord;
use crate::link::LinkRecord;

/// Parsed dump: usable records plus the lines that had to be skipped.
#[derive(Debug, Default)]
pub struct DumpContents {
    pub records: Vec<LinkRecord>,
    pub malformed: Vec<MalformedRecord>,
}

/// Parses one `link=page=line[=...]` dump line. Empty lines yield `Ok(None)`.
pub fn parse_dump_line(
    line_number: usize,
    line: &str,
) -> Result<Option<LinkRecord>, MalformedRecord> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split('=');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(link), Some(page), Some(source_line)) => {
            Ok(Some(LinkRecord::new(link, page, source_line)))
        }
        _ => Err(MalformedRecord {
            line_number,
            content: line.to_string(),
        }),
    }
}

/// Reads every dump line. Each line is decoded lossily on its own; I/O errors are fatal.
pub fn read_dump<R: BufRead>(reader: R) -> Result<DumpContents> {
    let mut contents = DumpContents::default();
    for (idx, line) in reader.split(b'\n').enumerate() {
        let line = line.with_context(|| format!("failed to read dump line {}", idx + 1))?;
        let line = String::from_utf8_lossy(&line);
        match parse_dump_line(idx + 1, &line) {
            Ok(Some(record)) => contents.records.push(record),
            Ok(None) => {}
            Err(malformed) => contents.malformed.push(malformed),
        }
    }
    Ok(contents)
}

pub fn read_dump_file(path: &Path) -> Result<DumpContents> {
    let file =
        File::open(path).with_context(|| format!("failed to open dump file: {}", path.display()))?;
    read_dump(BufReader::new(file))
        .with_context(|| format!("failed to read dump file: {}", path.display()))
}
