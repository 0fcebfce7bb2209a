//! Generation configuration
//!
//! Immutable description of every parameter of a generation run, built once from
//! the command line and shared read-only by all pipeline stages.

use crate::cli::Args;
use std::path::PathBuf;
use thiserror::Error;

/// Default number of words joined in one permutation
pub const DEFAULT_MAX_ARITY: usize = 2;

/// Errors detected before generation starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at most two values are accepted for --year (got {0})")]
    TooManyYears(usize),

    #[error("invalid year '{0}': expected a positive 4-digit number (YYYY)")]
    InvalidYear(String),

    #[error("at most two values are accepted for --age (got {0})")]
    TooManyAges(usize),

    #[error("invalid age '{0}': expected a positive 2-digit number (YY)")]
    InvalidAge(String),

    #[error("min-length ({min}) is greater than max-length ({max})")]
    InvertedLengthBounds { min: usize, max: usize },

    #[error("\"{}\" is not a valid input file path", .0.display())]
    InvalidInput(PathBuf),

    #[error("\"{}\" is not a valid output file path", .0.display())]
    InvalidOutput(PathBuf),
}

/// Case transformation applied to every seed word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    AllUpper,
    AllLower,
    /// First character upper-cased, the rest lower-cased
    FirstUpper,
    /// Every alphabetic run starts with an upper-case character
    TitleCase,
    /// Every lower/upper combination of every character position
    #[default]
    AllPossibleCases,
}

impl CaseMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AllUpper => "all-uppercase",
            Self::AllLower => "all-lowercase",
            Self::FirstUpper => "first-uppercase",
            Self::TitleCase => "camelcase",
            Self::AllPossibleCases => "all-possible-cases",
        }
    }
}

/// Optional min/max bounds on word length, measured in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LengthBounds {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl LengthBounds {
    /// Build bounds from raw option values. Absent, negative or zero values disable a bound.
    pub fn from_raw(min: Option<i64>, max: Option<i64>) -> Result<Self, ConfigError> {
        let enabled = |v: Option<i64>| v.filter(|&v| v > 0).map(|v| v as usize);
        let bounds = Self {
            min: enabled(min),
            max: enabled(max),
        };

        if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
            if min > max {
                return Err(ConfigError::InvertedLengthBounds { min, max });
            }
        }

        Ok(bounds)
    }

    #[inline]
    pub fn exceeds_max(&self, word: &str) -> bool {
        self.max.is_some_and(|max| char_len(word) > max)
    }

    #[inline]
    pub fn below_min(&self, word: &str) -> bool {
        self.min.is_some_and(|min| char_len(word) < min)
    }
}

/// Length of a word in characters
#[inline]
pub fn char_len(word: &str) -> usize {
    if word.is_ascii() {
        word.len()
    } else {
        word.chars().count()
    }
}

/// Where year strings are attached to a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPlacements {
    pub begin: bool,
    pub end: bool,
    pub split: bool,
}

impl YearPlacements {
    pub const ALL: Self = Self {
        begin: true,
        end: true,
        split: true,
    };

    /// Nothing explicitly chosen means every placement
    pub fn or_all(self) -> Self {
        if self.begin || self.end || self.split {
            self
        } else {
            Self::ALL
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearDecoration {
    /// Ascending 4-digit years
    pub years: Vec<u32>,
    pub placements: YearPlacements,
}

/// Where age strings are attached to a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgePlacements {
    pub start: bool,
    pub end: bool,
}

impl AgePlacements {
    pub const BOTH: Self = Self {
        start: true,
        end: true,
    };

    pub fn or_both(self) -> Self {
        if self.start || self.end {
            self
        } else {
            Self::BOTH
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeDecoration {
    /// Ascending ages
    pub ages: Vec<u32>,
    pub placements: AgePlacements,
}

/// Complete, validated configuration of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub case_mode: CaseMode,
    /// Distinct separators; always contains the empty separator
    pub separators: Vec<String>,
    pub max_arity: usize,
    pub bounds: LengthBounds,
    pub year: Option<YearDecoration>,
    pub age: Option<AgeDecoration>,
    pub dedup: bool,
    /// Worker threads per parallel stage (0 = auto-detect)
    pub workers: usize,
    pub quiet: bool,
    pub verbose: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            case_mode: CaseMode::default(),
            separators: vec![String::new()],
            max_arity: DEFAULT_MAX_ARITY,
            bounds: LengthBounds::default(),
            year: None,
            age: None,
            dedup: false,
            workers: 0,
            quiet: false,
            verbose: false,
        }
    }
}

impl GenerationConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let bounds = LengthBounds::from_raw(args.min_length, args.max_length)?;

        let year = match args.year.as_deref() {
            Some(tokens) if !tokens.is_empty() => Some(YearDecoration {
                years: parse_years(tokens)?,
                placements: YearPlacements {
                    begin: args.begin_with_year,
                    end: args.end_with_year,
                    split: args.splitted_year,
                }
                .or_all(),
            }),
            _ => None,
        };

        let age = match args.age.as_deref() {
            Some(tokens) if !tokens.is_empty() => Some(AgeDecoration {
                ages: parse_ages(tokens)?,
                placements: AgePlacements {
                    start: args.start_with_age,
                    end: args.end_with_age,
                }
                .or_both(),
            }),
            _ => None,
        };

        Ok(Self {
            case_mode: args.case_mode(),
            separators: normalize_separators(args.separator.as_deref().unwrap_or_default()),
            max_arity: DEFAULT_MAX_ARITY,
            bounds,
            year,
            age,
            dedup: args.uniq,
            workers: args.threads.unwrap_or(0),
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    /// Number of worker threads a parallel stage should start
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        match num_cpus::get() {
            0 => 2,
            n => n,
        }
    }
}

/// Prepend the implicit empty separator and drop duplicates, keeping first occurrences
pub fn normalize_separators(separators: &[String]) -> Vec<String> {
    let mut normalized = vec![String::new()];
    for sep in separators {
        if !normalized.contains(sep) {
            normalized.push(sep.clone());
        }
    }
    normalized
}

fn parse_fixed_digits(token: &str, digits: usize) -> Option<u32> {
    if token.len() != digits || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|&v| v > 0)
}

/// Parse one or two year tokens. Two distinct years form the half-open range `[min, max)`.
pub fn parse_years(tokens: &[String]) -> Result<Vec<u32>, ConfigError> {
    if tokens.len() > 2 {
        return Err(ConfigError::TooManyYears(tokens.len()));
    }

    let years = tokens
        .iter()
        .map(|t| parse_fixed_digits(t, 4).ok_or_else(|| ConfigError::InvalidYear(t.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match years[..] {
        [a, b] if a != b => (a.min(b)..a.max(b)).collect(),
        [a, ..] => vec![a],
        [] => Vec::new(),
    })
}

/// Parse one or two age tokens. Two distinct ages form the closed range `[min, max]`.
pub fn parse_ages(tokens: &[String]) -> Result<Vec<u32>, ConfigError> {
    if tokens.len() > 2 {
        return Err(ConfigError::TooManyAges(tokens.len()));
    }

    let ages = tokens
        .iter()
        .map(|t| parse_fixed_digits(t, 2).ok_or_else(|| ConfigError::InvalidAge(t.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match ages[..] {
        [a, b] if a != b => (a.min(b)..=a.max(b)).collect(),
        [a, ..] => vec![a],
        [] => Vec::new(),
    })
}
