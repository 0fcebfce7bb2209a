//! Case transformation stage
//!
//! Expands every seed word into its case variants. Runs single-threaded.

use crate::config::CaseMode;

/// Apply a case transformation to every seed word
///
/// Empty seed words yield no variants. All-possible-cases output is not
/// deduplicated: characters without case produce identical variants.
pub fn transform_words(seeds: &[String], mode: CaseMode) -> Vec<String> {
    let mut words = Vec::with_capacity(match mode {
        CaseMode::AllPossibleCases => seeds.len() * 4,
        _ => seeds.len(),
    });

    for seed in seeds.iter().filter(|s| !s.is_empty()) {
        match mode {
            CaseMode::AllUpper => words.push(seed.to_uppercase()),
            CaseMode::AllLower => words.push(seed.to_lowercase()),
            CaseMode::FirstUpper => words.push(capitalize(seed)),
            CaseMode::TitleCase => words.push(title_case(seed)),
            CaseMode::AllPossibleCases => all_cases(seed, &mut words),
        }
    }

    words
}

/// First character upper-cased, everything else lower-cased
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
pub fn title_case(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut in_run = false;

    for c in word.chars() {
        if c.is_alphabetic() {
            if in_run {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_run = true;
        } else {
            result.push(c);
            in_run = false;
        }
    }

    result
}

/// Push the Cartesian product of {lower, upper} over every character position.
/// The first position varies slowest; exactly 2^len variants are produced.
pub fn all_cases(word: &str, out: &mut Vec<String>) {
    let mut variants = vec![String::with_capacity(word.len())];

    for c in word.chars() {
        let lower: String = c.to_lowercase().collect();
        let upper: String = c.to_uppercase().collect();

        variants = variants
            .into_iter()
            .flat_map(|prefix| {
                let mut with_upper = prefix.clone();
                with_upper.push_str(&upper);
                let mut with_lower = prefix;
                with_lower.push_str(&lower);
                [with_lower, with_upper]
            })
            .collect();
    }

    out.extend(variants);
}
