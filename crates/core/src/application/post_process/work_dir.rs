// Scoped work directory holding the single work file

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::application::constants::{TEMP_DIR_PREFIX, WORK_FILE_NAME};
use crate::domain::LineStream;

/// Fresh temp directory with one work file path inside
///
/// The directory and its contents are removed when this value is dropped or
/// closed, so every exit path of the pipeline cleans up.
pub struct WorkDir {
    dir: TempDir,
    work_file: PathBuf,
}

impl WorkDir {
    /// Create under `root`, or under the system temp dir when `None`
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        let work_file = dir.path().join(WORK_FILE_NAME);
        Ok(Self { dir, work_file })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn work_file(&self) -> &Path {
        &self.work_file
    }

    /// Write the stream, one `\n` per line; the file is closed on return
    pub async fn write_lines(&self, lines: &LineStream) -> io::Result<()> {
        tokio::fs::write(&self.work_file, lines.to_work_file_contents()).await
    }

    /// Read the (possibly rewritten) work file back as lines
    pub async fn read_lines(&self) -> io::Result<LineStream> {
        let contents = tokio::fs::read_to_string(&self.work_file).await?;
        Ok(LineStream::from_work_file_contents(&contents))
    }

    /// Remove the directory, reporting removal errors instead of ignoring them
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let work_dir = WorkDir::create(None).unwrap();
        let lines: LineStream = ["G28", "G1 Z5"].into_iter().collect();

        work_dir.write_lines(&lines).await.unwrap();
        let read = work_dir.read_lines().await.unwrap();

        assert_eq!(read.lines(), ["G28\n", "G1 Z5\n"]);
        assert_eq!(
            work_dir.work_file().file_name().and_then(|n| n.to_str()),
            Some("work.gcode")
        );
    }

    #[test]
    fn test_drop_removes_directory() {
        let work_dir = WorkDir::create(None).unwrap();
        let path = work_dir.path().to_path_buf();
        std::fs::write(work_dir.work_file(), "G1\n").unwrap();
        assert!(path.exists());

        drop(work_dir);

        assert!(!path.exists());
    }

    #[test]
    fn test_close_removes_directory_under_root() {
        let root = tempfile::tempdir().unwrap();
        let work_dir = WorkDir::create(Some(root.path())).unwrap();
        assert!(work_dir.path().starts_with(root.path()));

        work_dir.close().unwrap();

        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let work_dir = WorkDir::create(None).unwrap();
        let err = work_dir.read_lines().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
