//! Output management module
//!
//! Handles validation of the output path, buffered writing of generated words and the
//! final minimum-length filter applied while words are written.

use crate::config::{ConfigError, LengthBounds};
use crate::pipeline::Wordlist;
use indicatif::ProgressBar;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for file writing (4MB)
pub const DEFAULT_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Destination of generated words
pub trait WordSink {
    /// Emit one word
    fn emit(&mut self, word: &str) -> anyhow::Result<()>;
}

impl WordSink for Vec<String> {
    fn emit(&mut self, word: &str) -> anyhow::Result<()> {
        self.push(word.to_string());
        Ok(())
    }
}

/// Output file writer with buffering, one word per line
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) the output file
    pub fn new(path: PathBuf, buffer_size: usize) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        let writer = BufWriter::with_capacity(buffer_size, file);

        Ok(Self {
            writer,
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl WordSink for OutputWriter {
    fn emit(&mut self, word: &str) -> anyhow::Result<()> {
        self.write_line(word)
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Outcome of writing a word list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: u64,
    pub too_short: u64,
}

/// Emit the base words then the decorations, dropping words below the minimum length
pub fn write_wordlist(
    wordlist: &Wordlist,
    bounds: &LengthBounds,
    sink: &mut dyn WordSink,
    progress: &ProgressBar,
) -> anyhow::Result<WriteReport> {
    let mut report = WriteReport::default();

    for word in wordlist.iter() {
        progress.inc(1);
        if bounds.below_min(word) {
            report.too_short += 1;
            continue;
        }
        sink.emit(word)?;
        report.written += 1;
    }

    Ok(report)
}

/// The parent directory of `path` must exist and be writable
pub fn validate_output_path(path: &Path) -> Result<(), ConfigError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let writable = parent
        .metadata()
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false);

    if writable && !path.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::InvalidOutput(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn wordlist(base: &[&str], decorations: &[&str]) -> Wordlist {
        Wordlist {
            base: base.iter().map(|s| s.to_string()).collect(),
            decorations: decorations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_output_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        let mut writer = OutputWriter::new(path.clone(), 1024).unwrap();
        writer.write_line("hello").unwrap();
        writer.write_line("world").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.bytes_written(), 12);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "hello\nworld\n");
    }

    #[test]
    fn test_min_length_filter() {
        let list = wordlist(&["ab", "abcd"], &["abc99", "a9"]);
        let bounds = LengthBounds { min: Some(3), max: None };
        let mut sink: Vec<String> = Vec::new();

        let report = write_wordlist(&list, &bounds, &mut sink, &ProgressBar::hidden()).unwrap();

        assert_eq!(sink, vec!["abcd", "abc99"]);
        assert_eq!(report, WriteReport { written: 2, too_short: 2 });
    }

    #[test]
    fn test_duplicates_written_verbatim() {
        let list = wordlist(&["x", "x"], &["x"]);
        let mut sink: Vec<String> = Vec::new();

        let report =
            write_wordlist(&list, &LengthBounds::default(), &mut sink, &ProgressBar::hidden()).unwrap();

        assert_eq!(report.written, 3);
        assert_eq!(sink, vec!["x", "x", "x"]);
    }

    #[test]
    fn test_validate_output_path() {
        let temp_dir = TempDir::new().unwrap();

        assert!(validate_output_path(&temp_dir.path().join("out.txt")).is_ok());
        assert!(validate_output_path(&temp_dir.path().join("missing/out.txt")).is_err());
        assert!(validate_output_path(temp_dir.path()).is_err());
    }
}
