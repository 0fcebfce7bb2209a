//! Input handling module
//!
//! Recognizes text input files, detects their encoding and loads the seed words.

use crate::config::ConfigError;
use ahash::RandomState;
use anyhow::Context;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use hashbrown::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected when deciding whether a file is text
const TEXT_SAMPLE_SIZE: usize = 512;

/// Maximum share of non-text bytes in the sample
const MAX_NON_TEXT_RATIO: f64 = 0.30;

/// Bytes counted as text: printable ASCII plus common whitespace/control characters
#[inline]
fn is_text_byte(b: u8) -> bool {
    matches!(b, 32..=126 | b'\n' | b'\r' | b'\t' | 0x0c | 0x08)
}

/// Decide whether a byte sample looks like text
pub fn looks_like_text(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return true;
    }
    if memchr::memchr(0, sample).is_some() {
        return false;
    }

    let non_text = sample.iter().filter(|&&b| !is_text_byte(b)).count();
    non_text as f64 / sample.len() as f64 <= MAX_NON_TEXT_RATIO
}

/// Sample the first bytes of a file and decide whether it is text
pub fn is_text_file(path: &Path) -> anyhow::Result<bool> {
    let mut sample = Vec::with_capacity(TEXT_SAMPLE_SIZE);
    File::open(path)?
        .take(TEXT_SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)?;

    Ok(looks_like_text(&sample))
}

/// Reject missing, non-regular or non-text input files
pub fn validate_input_path(path: &Path) -> Result<(), ConfigError> {
    let valid = path.is_file() && is_text_file(path).unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidInput(path.to_path_buf()))
    }
}

/// Deduplicated, read-only collection of input words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet {
    words: Vec<String>,
}

impl SeedSet {
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SeedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = HashSet::with_hasher(RandomState::new());
        let words = iter
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| seen.insert(w.clone()))
            .collect();
        Self { words }
    }
}

/// Detect BOM (Byte Order Mark) at the start of content, returning the encoding and BOM length
fn detect_bom(content: &[u8]) -> Option<(&'static Encoding, usize)> {
    if content.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Some((encoding_rs::UTF_8, 3));
    }
    if content.starts_with(&[0xFE, 0xFF]) {
        return Some((encoding_rs::UTF_16BE, 2));
    }
    if content.starts_with(&[0xFF, 0xFE]) {
        return Some((encoding_rs::UTF_16LE, 2));
    }
    None
}

/// Guess the encoding of a buffer (first 64KB are enough)
fn detect_encoding(content: &[u8]) -> &'static Encoding {
    let sample = &content[..content.len().min(64 * 1024)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == content.len());
    detector.guess(None, true)
}

/// Decode one line with the detected encoding
fn decode_line(bytes: &[u8], encoding: &'static Encoding) -> String {
    if encoding == encoding_rs::UTF_8 {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        }
    } else {
        let (decoded, had_errors) = encoding.decode_without_bom_handling(bytes);
        if had_errors {
            log::warn!("Encoding errors in line, using lossy conversion");
        }
        decoded.into_owned()
    }
}

/// Split a buffer into lines, dropping `\n` / `\r\n` terminators
fn split_lines(content: &[u8], encoding: &'static Encoding) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;

    while position < content.len() {
        let remaining = &content[position..];
        let line_end = memchr::memchr(b'\n', remaining)
            .map(|i| i + 1)
            .unwrap_or(remaining.len());

        let line = &remaining[..line_end];
        position += line_end;

        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        lines.push(decode_line(line, encoding));
    }

    lines
}

/// Load the seed words of a file, one per line, deduplicated
pub fn load_seed_words(path: &Path) -> anyhow::Result<SeedSet> {
    let file = File::open(path).with_context(|| format!("Cannot open input file {:?}", path))?;

    if file.metadata()?.len() == 0 {
        return Ok(SeedSet::default());
    }

    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    let (encoding, content) = match detect_bom(&mmap) {
        Some((encoding, bom_len)) => (encoding, &mmap[bom_len..]),
        None => (detect_encoding(&mmap), &mmap[..]),
    };
    log::debug!("Input {:?} decoded as {}", path, encoding.name());

    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        // Line splitting works on bytes, so wide encodings are decoded up front
        let (decoded, had_errors) = encoding.decode_without_bom_handling(content);
        if had_errors {
            log::warn!("Encoding errors in {:?}, using lossy conversion", path);
        }
        return Ok(decoded.lines().collect());
    }

    Ok(split_lines(content, encoding).into_iter().collect())
}
