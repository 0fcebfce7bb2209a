//! Progress display module
//!
//! Provides styled progress bars and statistics display for the pentesting aesthetic.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║   ██╗    ██╗ ██████╗ ██████╗ ██████╗ ██╗     ██╗███████╗████████╗           ║
║   ██║    ██║██╔═══██╗██╔══██╗██╔══██╗██║     ██║██╔════╝╚══██╔══╝           ║
║   ██║ █╗ ██║██║   ██║██████╔╝██║  ██║██║     ██║███████╗   ██║              ║
║   ██║███╗██║██║   ██║██╔══██╗██║  ██║██║     ██║╚════██║   ██║              ║
║   ╚███╔███╔╝╚██████╔╝██║  ██║██████╔╝███████╗██║███████║   ██║              ║
║    ╚══╝╚══╝  ╚═════╝ ╚═╝  ╚═╝╚═════╝ ╚══════╝╚═╝╚══════╝   ╚═╝              ║
║                                                                              ║
║    ██████╗ ███████╗███╗   ██╗                                                ║
║   ██╔════╝ ██╔════╝████╗  ██║                                                ║
║   ██║  ███╗█████╗  ██╔██╗ ██║                                                ║
║   ██║   ██║██╔══╝  ██║╚██╗██║                                                ║
║   ╚██████╔╝███████╗██║ ╚████║                                                ║
║    ╚═════╝ ╚══════╝╚═╝  ╚═══╝                                                ║
║                                                                              ║
║                    Seed-Based Candidate Password Lists                        ║
║                         For Penetration Testing                               ║
║                                                              v1.0.0          ║
╚══════════════════════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled progress bar, or a hidden one in quiet mode
pub fn stage_progress_bar(total: u64, msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Generation statistics, one counter per pipeline stage
#[derive(Debug)]
pub struct GenerationStats {
    pub seed_words: AtomicU64,
    pub transformed_words: AtomicU64,
    pub combined_words: AtomicU64,
    pub decorated_words: AtomicU64,
    pub duplicates_removed: AtomicU64,
    pub too_short: AtomicU64,
    pub written_words: AtomicU64,
    pub written_bytes: AtomicU64,
    pub start_time: Instant,
}

impl GenerationStats {
    pub fn new() -> Self {
        Self {
            seed_words: AtomicU64::new(0),
            transformed_words: AtomicU64::new(0),
            combined_words: AtomicU64::new(0),
            decorated_words: AtomicU64::new(0),
            duplicates_removed: AtomicU64::new(0),
            too_short: AtomicU64::new(0),
            written_words: AtomicU64::new(0),
            written_bytes: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn set_seed_words(&self, count: usize) {
        self.seed_words.store(count as u64, Ordering::Relaxed);
    }

    pub fn set_transformed_words(&self, count: usize) {
        self.transformed_words.store(count as u64, Ordering::Relaxed);
    }

    pub fn set_combined_words(&self, count: usize) {
        self.combined_words.store(count as u64, Ordering::Relaxed);
    }

    pub fn add_decorated(&self, count: usize) {
        self.decorated_words.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn add_duplicates(&self, count: usize) {
        self.duplicates_removed.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_write(&self, written: u64, too_short: u64, bytes: u64) {
        self.written_words.fetch_add(written, Ordering::Relaxed);
        self.too_short.fetch_add(too_short, Ordering::Relaxed);
        self.written_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_seed_words(&self) -> u64 {
        self.seed_words.load(Ordering::Relaxed)
    }

    pub fn get_transformed_words(&self) -> u64 {
        self.transformed_words.load(Ordering::Relaxed)
    }

    pub fn get_combined_words(&self) -> u64 {
        self.combined_words.load(Ordering::Relaxed)
    }

    pub fn get_decorated_words(&self) -> u64 {
        self.decorated_words.load(Ordering::Relaxed)
    }

    pub fn get_duplicates_removed(&self) -> u64 {
        self.duplicates_removed.load(Ordering::Relaxed)
    }

    pub fn get_too_short(&self) -> u64 {
        self.too_short.load(Ordering::Relaxed)
    }

    pub fn get_written_words(&self) -> u64 {
        self.written_words.load(Ordering::Relaxed)
    }

    pub fn get_written_bytes(&self) -> u64 {
        self.written_bytes.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn words_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_written_words() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        let elapsed = self.elapsed();

        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    GENERATION COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Seed words:     ".green(), format_number(self.get_seed_words()));
        println!("  {} {}", "Transformed:    ".green(), format_number(self.get_transformed_words()));
        println!("  {} {}", "Combined:       ".green(), format_number(self.get_combined_words()));
        println!("  {} {}", "Decorated:      ".green(), format_number(self.get_decorated_words()));
        println!("  {} {}", "Duplicates:     ".yellow(), format_number(self.get_duplicates_removed()));
        println!("  {} {}", "Too short:      ".yellow(), format_number(self.get_too_short()));
        println!(
            "  {} {}",
            "Words written:  ".green().bold(),
            format_number(self.get_written_words()).green().bold()
        );
        println!("  {} {}", "Output size:    ".green(), ByteSize(self.get_written_bytes()));

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(elapsed));
        println!("  {} {:.2} words/sec", "Throughput:     ".green(), self.words_per_second());
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for GenerationStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}
