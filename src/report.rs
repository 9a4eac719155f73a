use anyhow::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissKind {
    Package,
    ClassFile,
    Member,
}

/// A link that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: MissKind,
    /// Package name, entry path, or `Class#member` that was looked for.
    pub target: String,
    pub page: String,
    pub line: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub records: usize,
    pub resolved: usize,
    pub missing: usize,
    pub malformed: usize,
    pub archives_opened: usize,
    pub archives_skipped: usize,
}

pub trait Reporter {
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<()>;

    fn finish(&mut self, summary: &Summary) -> Result<()>;
}

/// Plain `Did not find` blocks, written as they arrive.
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        writeln!(self.out, "==========")?;
        writeln!(self.out, "Did not find: {}", diagnostic.target)?;
        writeln!(self.out, "Page: {}", diagnostic.page)?;
        writeln!(self.out, "On line: {}", diagnostic.line)?;
        Ok(())
    }

    fn finish(&mut self, _summary: &Summary) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a Summary,
    missing: &'a [Diagnostic],
}

/// Buffers every diagnostic and writes a single JSON document at the end.
pub struct JsonReporter<W: Write> {
    out: W,
    missing: Vec<Diagnostic>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            missing: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.missing.push(diagnostic.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        let report = JsonReport {
            summary,
            missing: &self.missing,
        };
        serde_json::to_writer_pretty(&mut self.out, &report)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn diagnostic() -> Diagnostic {
        Diagnostic {
            kind: MissKind::Package,
            target: "com.example.missing".to_string(),
            page: "pageB".to_string(),
            line: "7".to_string(),
        }
    }

    #[test]
    fn text_reporter_writes_blocks() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.report(&diagnostic()).unwrap();
        reporter.finish(&Summary::default()).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "==========\nDid not find: com.example.missing\nPage: pageB\nOn line: 7\n"
        );
    }

    #[test]
    fn json_reporter_writes_one_document() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.report(&diagnostic()).unwrap();
        let summary = Summary {
            records: 1,
            missing: 1,
            archives_opened: 1,
            ..Summary::default()
        };
        reporter.finish(&summary).unwrap();

        let value: Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(value["summary"]["missing"], 1);
        assert_eq!(value["missing"][0]["kind"], "package");
        assert_eq!(value["missing"][0]["page"], "pageB");
        assert_eq!(value["missing"][0]["line"], "7");
    }
}
