//! Generation pipeline
//!
//! Runs the stages strictly in order: case transformation, combination, year
//! decoration, age decoration, deduplication. Each parallel stage owns its worker
//! pool and returns only after every worker has joined, so the next stage always
//! reads a complete, frozen word list.

use crate::combine::Combiner;
use crate::config::GenerationConfig;
use crate::decorate::{run_decoration, AgeDecorator, Decoration, YearDecorator};
use crate::dedup::{collapse, create_deduplicator};
use crate::input::SeedSet;
use crate::output::{write_wordlist, OutputWriter, WordSink, WriteReport, DEFAULT_BUFFER_SIZE};
use crate::pool::WorkerPool;
use crate::progress::{print_header, print_info, print_success, print_warning, stage_progress_bar, GenerationStats};
use crate::transform::transform_words;

use colored::*;
use std::path::Path;
use std::sync::Arc;

/// Final output of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wordlist {
    /// Transformed words followed by their combinations
    pub base: Vec<String>,
    /// Year and age decorations of the base words
    pub decorations: Vec<String>,
}

impl Wordlist {
    /// Base words, then decorations
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.base.iter().chain(&self.decorations).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Main generator
pub struct Generator {
    config: GenerationConfig,
    stats: Arc<GenerationStats>,
}

impl Generator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            stats: Arc::new(GenerationStats::new()),
        }
    }

    fn header(&self, text: &str) {
        if !self.config.quiet {
            print_header(text);
        }
    }

    fn pool(&self, name: &str, units: usize, msg: &str) -> WorkerPool {
        WorkerPool::new(name, self.config.worker_count())
            .with_progress(stage_progress_bar(units as u64, msg, self.config.quiet))
    }

    /// Run every stage over `seeds`
    pub fn generate(&self, seeds: &SeedSet) -> anyhow::Result<Wordlist> {
        let config = &self.config;
        self.stats.set_seed_words(seeds.len());

        self.header(&format!("Applying {} transformation...", config.case_mode.name()));
        let transformed = transform_words(seeds.words(), config.case_mode);
        self.stats.set_transformed_words(transformed.len());
        log::info!("{} seed words expanded to {} case variants", seeds.len(), transformed.len());

        self.header("Combining words...");
        let combiner = Combiner::new(config.separators.clone(), config.max_arity, config.bounds);
        let pool = self.pool("permutator", config.separators.len(), "permutations");
        let combined = combiner.combine(transformed, &pool)?;
        self.stats.set_combined_words(combined.len());
        log::info!("Current wordlist length: {}", combined.len());

        let mut base = combined;
        let mut decorations = Vec::new();

        let mut stages: Vec<Box<dyn Decoration>> = Vec::new();
        if let Some(ref year) = config.year {
            stages.push(Box::new(YearDecorator::new(year)));
        }
        if let Some(ref age) = config.age {
            stages.push(Box::new(AgeDecorator::new(age)));
        }

        for decoration in &stages {
            self.header(&format!("Applying {} decoration...", decoration.name()));
            let pool = self.pool(
                &format!("{}-transformer", decoration.name()),
                base.len(),
                &format!("{} transformation", decoration.name()),
            );
            let decorated = run_decoration(decoration.as_ref(), &base, &config.bounds, &pool)?;
            self.stats.add_decorated(decorated.len());
            decorations.extend(decorated);
        }

        if config.dedup {
            self.header("Removing duplicates...");
        }
        let (base_len, decorations_len) = (base.len(), decorations.len());
        let before = base_len + decorations_len;
        base = collapse(base, &mut *create_deduplicator(config.dedup, base_len));
        decorations = collapse(decorations, &mut *create_deduplicator(config.dedup, decorations_len));

        let removed = before - base.len() - decorations.len();
        self.stats.add_duplicates(removed);
        if config.dedup {
            log::info!("{} duplicates removed", removed);
        }

        Ok(Wordlist { base, decorations })
    }

    /// Write a generated word list to `sink`, applying the minimum length
    pub fn write(&self, wordlist: &Wordlist, sink: &mut dyn WordSink) -> anyhow::Result<WriteReport> {
        let pb = stage_progress_bar(wordlist.len() as u64, "writing", self.config.quiet);
        let report = write_wordlist(wordlist, &self.config.bounds, sink, &pb)?;
        pb.finish_with_message("Complete".green().to_string());

        log::info!(
            "{} words written, {} below the minimum length",
            report.written,
            report.too_short
        );
        Ok(report)
    }

    /// Generate from `seeds` and write the result to the file at `output`
    pub fn generate_to_file(&self, seeds: &SeedSet, output: &Path) -> anyhow::Result<WriteReport> {
        if seeds.is_empty() && !self.config.quiet {
            print_warning("No input words loaded, the output will be empty");
        }

        let wordlist = self.generate(seeds)?;

        self.header("Writing wordlist...");
        let mut writer = OutputWriter::new(output.to_path_buf(), DEFAULT_BUFFER_SIZE)?;
        let report = self.write(&wordlist, &mut writer)?;
        writer.flush()?;
        self.stats.record_write(report.written, report.too_short, writer.bytes_written());

        if !self.config.quiet {
            print_success(&format!("Output written to: {:?}", writer.path()));
            print_info(&format!("Words written: {}", writer.lines_written()));
        }

        Ok(report)
    }

    /// Get generation statistics
    pub fn stats(&self) -> Arc<GenerationStats> {
        Arc::clone(&self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AgeDecoration, AgePlacements, CaseMode, LengthBounds, YearDecoration, YearPlacements};
    use tempfile::TempDir;

    fn quiet_config() -> GenerationConfig {
        GenerationConfig {
            quiet: true,
            workers: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_single_seed() {
        let config = GenerationConfig {
            case_mode: CaseMode::AllLower,
            separators: vec![String::new(), "-".to_string()],
            bounds: LengthBounds { min: None, max: Some(10) },
            ..quiet_config()
        };
        let seeds: SeedSet = ["abc"].into_iter().collect();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        let generator = Generator::new(config);
        let report = generator.generate_to_file(&seeds, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(report.written, lines.len() as u64);
        assert_eq!(lines[0], "abc");
        assert!(lines.contains(&"abc-"));
        assert!(lines.contains(&"-abc"));
        assert!(lines.iter().all(|w| w.chars().count() <= 10));
        assert_eq!(generator.stats().get_written_words(), report.written);
    }

    #[test]
    fn test_decorations_follow_base_words() {
        let config = GenerationConfig {
            case_mode: CaseMode::AllLower,
            year: Some(YearDecoration { years: vec![1999], placements: YearPlacements::ALL }),
            age: Some(AgeDecoration { ages: vec![25], placements: AgePlacements::BOTH }),
            ..quiet_config()
        };
        let seeds: SeedSet = ["pwd"].into_iter().collect();

        let wordlist = Generator::new(config).generate(&seeds).unwrap();

        // "pwd" plus "pwd" twice from the empty-separator pool
        assert_eq!(wordlist.base, vec!["pwd", "pwd", "pwd"]);
        assert_eq!(wordlist.decorations.len(), 3 * (7 + 2));
        for expected in ["99pwd", "1999pwd", "999pwd", "pwd99", "pwd1999", "pwd999", "19pwd99", "25pwd", "pwd25"] {
            assert!(wordlist.decorations.iter().any(|w| w == expected), "missing {}", expected);
        }

        // Year decorations come before age decorations
        let first_age = wordlist.decorations.iter().position(|w| w == "25pwd").unwrap();
        assert!(wordlist.decorations[..first_age].iter().all(|w| w.contains("99")));
    }

    #[test]
    fn test_dedup_collapses_both_lists() {
        let config = GenerationConfig {
            case_mode: CaseMode::AllLower,
            age: Some(AgeDecoration { ages: vec![25], placements: AgePlacements::BOTH }),
            dedup: true,
            ..quiet_config()
        };
        let seeds: SeedSet = ["pwd"].into_iter().collect();

        let generator = Generator::new(config);
        let wordlist = generator.generate(&seeds).unwrap();

        assert_eq!(wordlist.base, vec!["pwd"]);
        let mut decorations = wordlist.decorations.clone();
        decorations.sort();
        assert_eq!(decorations, vec!["25pwd", "pwd25"]);
        assert_eq!(generator.stats().get_duplicates_removed(), 2 + 4);
    }

    #[test]
    fn test_all_cases_pipeline_counts() {
        let seeds: SeedSet = ["ab"].into_iter().collect();
        let generator = Generator::new(quiet_config());

        let wordlist = generator.generate(&seeds).unwrap();

        // 4 variants, P(5,2) = 20 arrangements over the variants plus the empty separator
        assert_eq!(generator.stats().get_transformed_words(), 4);
        assert_eq!(wordlist.base.len(), 4 + 20);
        assert!(wordlist.base.contains(&"aBAb".to_string()));
        assert!(wordlist.decorations.is_empty());
    }

    #[test]
    fn test_min_length_applied_at_write() {
        let config = GenerationConfig {
            case_mode: CaseMode::AllLower,
            separators: vec![String::new(), "-".to_string()],
            bounds: LengthBounds { min: Some(4), max: None },
            ..quiet_config()
        };
        let seeds: SeedSet = ["abc", "de"].into_iter().collect();
        let generator = Generator::new(config);

        let wordlist = generator.generate(&seeds).unwrap();
        let mut sink: Vec<String> = Vec::new();
        let report = generator.write(&wordlist, &mut sink).unwrap();

        assert!(sink.iter().all(|w| w.chars().count() >= 4));
        assert!(sink.contains(&"abc-".to_string()));
        assert!(sink.contains(&"abcde".to_string()));
        assert_eq!(report.written + report.too_short, wordlist.len() as u64);
    }
}
