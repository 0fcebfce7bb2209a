//! Wordlist Generator - seed-based candidate password lists for penetration testing
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use wordlist_generator::cli::Args;
use wordlist_generator::config::GenerationConfig;
use wordlist_generator::input::{load_seed_words, validate_input_path};
use wordlist_generator::output::validate_output_path;
use wordlist_generator::pipeline::Generator;
use wordlist_generator::progress::{print_banner, print_bullet, print_error, print_header, print_info};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    // Validate arguments before any generation work
    validate_input_path(&args.input)?;
    validate_output_path(&args.output)?;
    let config = GenerationConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    let seeds = load_seed_words(&args.input)?;
    log::info!("Loaded {} input words from {:?}", seeds.len(), args.input);

    let generator = Generator::new(config);
    generator.generate_to_file(&seeds, &args.output)?;

    if !args.quiet {
        generator.stats().print_summary();
    }

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &GenerationConfig) {
    print_header("Configuration");

    print_info(&format!("Input:        {:?}", args.input));
    print_info(&format!("Output:       {:?}", args.output));
    print_info(&format!("Case mode:    {}", config.case_mode.name()));
    print_info(&format!("Separators:   {:?}", config.separators));
    print_info(&format!("Max arity:    {}", config.max_arity));

    if let Some(min) = config.bounds.min {
        print_info(&format!("Min length:   {}", min));
    }
    if let Some(max) = config.bounds.max {
        print_info(&format!("Max length:   {}", max));
    }

    if let Some(ref year) = config.year {
        print_info(&format!("Years:        {:?}", year.years));
        let p = year.placements;
        print_bullet(&format!("begin: {}, end: {}, split: {}", p.begin, p.end, p.split));
    }
    if let Some(ref age) = config.age {
        print_info(&format!("Ages:         {:?}", age.ages));
        let p = age.placements;
        print_bullet(&format!("start: {}, end: {}", p.start, p.end));
    }

    print_info(&format!("Dedup:        {}", config.dedup));
    print_info(&format!("Threads:      {}", config.worker_count()));
}
