//! Command-line interface definition for wordlist-generator
//!
//! Provides argument parsing for the wordlist generation tool. Semantic validation
//! (year/age formats, length bounds, file paths) happens in [`crate::config`] and
//! [`crate::input`] / [`crate::output`].

use crate::config::CaseMode;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Multi-threaded wordlist generator for penetration testing
///
/// Builds candidate passwords from a seed list by applying case transformations,
/// combining words with separators and decorating them with years and ages.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-generator",
    author = "m0h1nd4",
    version,
    about = "Multi-threaded wordlist generator for penetration testing",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                        WORDLIST-GENERATOR v1.0.0                             ║
║                    Seed-Based Candidate Password Lists                        ║
║                         For Penetration Testing                               ║
╚══════════════════════════════════════════════════════════════════════════════╝

Starting from a list of seed words, applies a case transformation, combines every
transformed word with the others (optionally through separators) and decorates
the result with years and ages.

EXAMPLES:
    # All cases, four separators, years 1980-1998, lengths 8 to 12
    wordlist-generator -v -a -S , _ . - -Y 1980 1999 -m 8 -M 12 \
        -o /home/foo/wordlist.output wordlist.input

    # Lower-case only, ages 20 to 30 appended, duplicates removed
    wordlist-generator --all-lowercase -A 20 30 --end-with-age -u \
        -o out.txt seeds.txt

YEAR AND AGE RANGES:
    -Y 1990          - the single year 1990
    -Y 1990 1995     - years 1990 up to 1994 (the upper year is excluded)
    -A 20            - the single age 20
    -A 20 25         - ages 20 up to 25 (both included)
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/wordlist-generator"
)]
#[command(group(
    ArgGroup::new("case")
        .args(["all_uppercase", "all_lowercase", "first_uppercase", "camelcase", "all_possible_cases"])
        .multiple(false)
))]
pub struct Args {
    /// Path of the file containing the input (seed) words, one per line
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path of the file receiving the generated words
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Upper-case every input word
    #[arg(long, default_value_t = false)]
    pub all_uppercase: bool,

    /// Lower-case every input word
    #[arg(long, default_value_t = false)]
    pub all_lowercase: bool,

    /// Upper-case the first character, lower-case the rest
    #[arg(long, default_value_t = false)]
    pub first_uppercase: bool,

    /// Upper-case the first letter of every alphabetic run
    #[arg(long, default_value_t = false)]
    pub camelcase: bool,

    /// Every lower/upper-case combination of every input word (default)
    #[arg(short = 'a', long, default_value_t = false)]
    pub all_possible_cases: bool,

    /// Separator(s) placed between (transformed) words; the empty separator is always used
    #[arg(short = 'S', long, num_args = 0.., value_name = "SEP")]
    pub separator: Option<Vec<String>>,

    /// A year (YYYY) or a range of years (YYYY YYYY, upper year excluded)
    #[arg(short = 'Y', long, num_args = 0.., value_name = "YYYY")]
    pub year: Option<Vec<String>>,

    /// Prepend every year to every word (YY, YYYY and YYY forms)
    #[arg(long, default_value_t = false)]
    pub begin_with_year: bool,

    /// Append every year to every word (YY, YYYY and YYY forms)
    #[arg(long, default_value_t = false)]
    pub end_with_year: bool,

    /// Split every year in two halves, prepended and appended to every word
    #[arg(long, default_value_t = false)]
    pub splitted_year: bool,

    /// An age (YY) or a range of ages (YY YY, both included)
    #[arg(short = 'A', long, num_args = 0.., value_name = "YY")]
    pub age: Option<Vec<String>>,

    /// Prepend every age to every word
    #[arg(long, default_value_t = false)]
    pub start_with_age: bool,

    /// Append every age to every word
    #[arg(long, default_value_t = false)]
    pub end_with_age: bool,

    /// Minimum number of characters of any output word
    #[arg(short = 'm', long, value_name = "NUM", allow_negative_numbers = true)]
    pub min_length: Option<i64>,

    /// Maximum number of characters of any combined word
    #[arg(short = 'M', long, value_name = "NUM", allow_negative_numbers = true)]
    pub max_length: Option<i64>,

    /// Remove (almost) all duplicate output words
    #[arg(short, long, default_value_t = false)]
    pub uniq: bool,

    /// Number of worker threads per stage (default: auto-detect)
    #[arg(short = 't', long, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Selected case transformation, falling back to all possible cases
    pub fn case_mode(&self) -> CaseMode {
        if self.all_possible_cases {
            CaseMode::AllPossibleCases
        } else if self.all_uppercase {
            CaseMode::AllUpper
        } else if self.all_lowercase {
            CaseMode::AllLower
        } else if self.first_uppercase {
            CaseMode::FirstUpper
        } else if self.camelcase {
            CaseMode::TitleCase
        } else {
            CaseMode::AllPossibleCases
        }
    }
}
