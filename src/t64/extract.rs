//! Batch extraction of programs from a decoded archive.

use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::T64Archive;
use super::directory::{DirectoryRecord, normalize_name};
use crate::error::{Result, T64Error};

/// Destination for extracted program files
#[async_trait]
pub trait ProgramSink: Send + Sync {
    /// Store `payload` under `identifier`. Errors are reported as `SinkFailure`.
    async fn write(&self, identifier: &str, payload: &[u8]) -> Result<()>;
}

/// Writes programs as files into a destination directory.
pub struct FsSink {
    dest: PathBuf,
}

impl FsSink {
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self { dest: dest.into() }
    }

    /// Output path for `identifier`. Path separators are replaced so the
    /// file always lands directly inside the destination directory.
    pub fn path_for(&self, identifier: &str) -> PathBuf {
        let file_name: String = identifier
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dest.join(file_name)
    }
}

#[async_trait]
impl ProgramSink for FsSink {
    async fn write(&self, identifier: &str, payload: &[u8]) -> Result<()> {
        let failure = |source| T64Error::SinkFailure {
            identifier: identifier.to_string(),
            source,
        };

        // Create the destination directory if needed
        if !self.dest.as_os_str().is_empty() {
            fs::create_dir_all(&self.dest).await.map_err(failure)?;
        }

        let path = self.path_for(identifier);
        let mut file = fs::File::create(&path).await.map_err(failure)?;
        file.write_all(payload).await.map_err(failure)?;
        file.flush().await.map_err(failure)?;

        debug!(path = %path.display(), bytes = payload.len(), "wrote program");
        Ok(())
    }
}

/// Which records to extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Records whose normalized name is in the set.
    Names(BTreeSet<String>),
}

impl Selection {
    /// Build a name selection; an empty list selects everything.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = names
            .into_iter()
            .map(|n| normalize_name(n.as_ref()))
            .collect();
        if names.is_empty() {
            Selection::All
        } else {
            Selection::Names(names)
        }
    }

    pub fn matches(&self, record: &DirectoryRecord) -> bool {
        match self {
            Selection::All => true,
            Selection::Names(names) => names.contains(&record.normalized_name()),
        }
    }
}

/// What happened to one directory record.
#[derive(Debug)]
pub enum ExtractOutcome {
    Extracted {
        name: String,
        identifier: String,
        bytes: usize,
    },
    Skipped {
        name: String,
    },
    Failed {
        name: String,
        error: T64Error,
    },
}

impl ExtractOutcome {
    pub fn name(&self) -> &str {
        match self {
            ExtractOutcome::Extracted { name, .. }
            | ExtractOutcome::Skipped { name }
            | ExtractOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractOutcome::Failed { .. })
    }
}

/// Per-record results of one extraction pass, in directory order.
#[derive(Debug, Default)]
pub struct ExtractReport {
    pub outcomes: Vec<ExtractOutcome>,
    /// Requested names that matched no record.
    pub missing: Vec<String>,
}

impl ExtractReport {
    pub fn extracted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ExtractOutcome::Extracted { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

/// Extracts selected programs of an archive into a sink.
pub struct Extractor<'s, S: ProgramSink> {
    sink: &'s S,
}

impl<'s, S: ProgramSink> Extractor<'s, S> {
    pub fn new(sink: &'s S) -> Self {
        Self { sink }
    }

    /// Extract every selected record.
    ///
    /// A record that cannot be resolved or written is reported as failed and
    /// the remaining records are still processed.
    pub async fn extract(&self, archive: &T64Archive<'_>, selection: &Selection) -> ExtractReport {
        let mut report = ExtractReport::default();

        for record in &archive.records {
            let name = record.display_name().to_string();

            if !selection.matches(record) {
                report.outcomes.push(ExtractOutcome::Skipped { name });
                continue;
            }

            let outcome = match self.extract_one(archive, record).await {
                Ok((identifier, bytes)) => ExtractOutcome::Extracted {
                    name,
                    identifier,
                    bytes,
                },
                Err(error) => {
                    debug!(index = record.index, %error, "record not extracted");
                    ExtractOutcome::Failed { name, error }
                }
            };
            report.outcomes.push(outcome);
        }

        if let Selection::Names(names) = selection {
            report.missing = names
                .iter()
                .filter(|n| !archive.records.iter().any(|r| &r.normalized_name() == *n))
                .cloned()
                .collect();
        }

        report
    }

    async fn extract_one(
        &self,
        archive: &T64Archive<'_>,
        record: &DirectoryRecord,
    ) -> Result<(String, usize)> {
        let payload = archive.resolve(record)?.payload();
        let identifier = record.identifier();
        self.sink.write(&identifier, &payload).await?;
        Ok((identifier, payload.len()))
    }
}
