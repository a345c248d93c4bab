use super::ReadAt;
use crate::error::T64Error;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Local file reader with random access support
pub struct LocalFileReader {
    file: std::fs::File,
    size: u64,
}

impl LocalFileReader {
    /// Open `path`; a missing file is reported as `SourceNotFound`.
    pub fn new(path: &Path) -> Result<Self> {
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(T64Error::SourceNotFound(path.display().to_string()).into());
            }
            Err(e) => return Err(e.into()),
        };
        let size = file.metadata()?.len();
        Ok(Self { file, size })
    }
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file.read_exact_at(buf, offset)?;
        }

        #[cfg(not(unix))]
        {
            use std::io::{Read, Seek, SeekFrom};
            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(buf)?;
        }

        Ok(buf.len())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_source_not_found() {
        let err = LocalFileReader::new(Path::new("/nonexistent/tape.t64"))
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<T64Error>(),
            Some(T64Error::SourceNotFound(_))
        ));
    }
}
