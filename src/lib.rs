//! # Wordlist Generator
//!
//! Multi-threaded wordlist generator for penetration testing.
//!
//! ## Features
//!
//! - **Case transformations**: upper, lower, capitalized, title case or every possible case combination
//! - **Combination**: every ordered pair of transformed words, optionally joined by separators
//! - **Year decoration**: years prepended, appended or split around words (YY, YYYY and YYY forms)
//! - **Age decoration**: ages prepended or appended to words
//! - **Length bounds**: maximum length during combination, minimum length on output
//! - **Deduplication**: optional removal of duplicate words
//! - **Parallel processing**: every expensive stage runs on a pool of worker threads
//!
//! ## Usage
//!
//! ```bash
//! # Every case combination, four separators, years 1980-1998, lengths 8 to 12
//! wordlist-generator -v -a -S , _ . - -Y 1980 1999 -m 8 -M 12 -o out.txt seeds.txt
//!
//! # Lower-case words decorated with ages 20 to 30
//! wordlist-generator --all-lowercase -A 20 30 -u -o out.txt seeds.txt
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordlist_generator::config::{CaseMode, GenerationConfig, LengthBounds};
//! use wordlist_generator::input::SeedSet;
//! use wordlist_generator::pipeline::Generator;
//!
//! let config = GenerationConfig {
//!     case_mode: CaseMode::AllLower,
//!     separators: vec![String::new(), "-".to_string()],
//!     bounds: LengthBounds { min: None, max: Some(10) },
//!     ..Default::default()
//! };
//!
//! let seeds: SeedSet = ["abc"].into_iter().collect();
//! let generator = Generator::new(config);
//! let wordlist = generator.generate(&seeds).unwrap();
//! assert!(wordlist.iter().any(|w| w == "abc-"));
//! ```

pub mod cli;
pub mod combine;
pub mod config;
pub mod decorate;
pub mod dedup;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod pool;
pub mod progress;
pub mod transform;

pub use cli::Args;
pub use config::{ConfigError, GenerationConfig};
pub use pipeline::{Generator, Wordlist};
