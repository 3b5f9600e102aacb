use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::GameError;

/// Append-only log of finished rounds, one human-readable line per win.
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a win. Creates the file on first use.
    pub fn append(&self, start: i64, end: i64, attempts: u32) -> Result<(), GameError> {
        let stamp = Local::now().format("%d/%m/%Y %H:%M:%S");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "[{stamp}] range {start} to {end} - solved in {attempts} attempts"
        )?;
        Ok(())
    }

    /// All recorded lines, oldest first. A missing file is an empty log.
    pub fn entries(&self) -> Result<Vec<String>, GameError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_log() {
        let dir = TempDir::new().unwrap();
        let log = ScoreLog::new(dir.path().join("scores.txt"));
        assert!(log.entries().unwrap().is_empty());
    }

    #[test]
    fn test_append_accumulates_lines() {
        let dir = TempDir::new().unwrap();
        let log = ScoreLog::new(dir.path().join("scores.txt"));

        log.append(1, 100, 7).unwrap();
        log.append(1, 10, 3).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("range 1 to 100 - solved in 7 attempts"));
        assert!(entries[1].contains("range 1 to 10 - solved in 3 attempts"));
    }
}
