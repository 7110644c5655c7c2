//! Registration of produced files as build outputs.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Receives files the merge produced, tagged with a type and classifier.
pub trait ArtifactSink {
    fn attach(&mut self, file: &Path, kind: &str, classifier: &str) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One attached build output.
pub struct AttachedArtifact {
    pub file: PathBuf,
    #[serde(rename = "type")]
    pub kind: String,
    pub classifier: String,
}

impl ArtifactSink for Vec<AttachedArtifact> {
    fn attach(&mut self, file: &Path, kind: &str, classifier: &str) -> Result<()> {
        self.push(AttachedArtifact {
            file: file.to_path_buf(),
            kind: kind.to_string(),
            classifier: classifier.to_string(),
        });
        Ok(())
    }
}

/// Writes each attachment as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ArtifactSink for JsonLinesSink<W> {
    fn attach(&mut self, file: &Path, kind: &str, classifier: &str) -> Result<()> {
        let record = AttachedArtifact {
            file: file.to_path_buf(),
            kind: kind.to_string(),
            classifier: classifier.to_string(),
        };
        serde_json::to_writer(&mut self.writer, &record)
            .context("writing attachment record")?;
        writeln!(self.writer).context("writing attachment record")?;
        self.writer.flush().context("flushing attachment record")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn json_lines_sink_emits_one_record_per_attachment() -> Result<()> {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.attach(Path::new("/out/testcatalog.json"), "json", "testcatalog")?;
        sink.attach(Path::new("/out/other.json"), "json", "other")?;

        let output = String::from_utf8(sink.into_inner())?;
        let records: Vec<Value> = output
            .lines()
            .map(serde_json::from_str)
            .collect::<Result<_, _>>()?;
        assert_eq!(
            records,
            [
                json!({"file": "/out/testcatalog.json", "type": "json", "classifier": "testcatalog"}),
                json!({"file": "/out/other.json", "type": "json", "classifier": "other"}),
            ]
        );
        Ok(())
    }
}
