//! Year and age decoration stages
//!
//! Both stages read the frozen combination output by index and push decorated
//! variants into one shared buffer. A candidate already longer than the maximum
//! length is skipped, but decorated results are not re-checked against it.

use crate::config::{AgeDecoration, AgePlacements, LengthBounds, YearDecoration, YearPlacements};
use crate::pool::{Batch, PoolError, WorkerPool};

/// Produces decorated variants of a single word
pub trait Decoration: Send + Sync {
    /// Stage name, used for worker thread names and logging
    fn name(&self) -> &'static str;

    /// Push every decorated variant of `word`
    fn decorate(&self, word: &str, batch: &mut Batch<'_>);
}

/// Renderings of one year used by the year decoration
#[derive(Debug, Clone, PartialEq, Eq)]
struct YearForms {
    /// `1999`
    full: String,
    /// `99`
    two_digit: String,
    /// `999`
    mid_three: String,
    /// `19`
    first_two: String,
}

impl YearForms {
    fn new(year: u32) -> Self {
        let full = format!("{:04}", year);
        Self {
            two_digit: full[2..4].to_string(),
            mid_three: full[1..4].to_string(),
            first_two: full[0..2].to_string(),
            full,
        }
    }
}

pub struct YearDecorator {
    forms: Vec<YearForms>,
    placements: YearPlacements,
}

impl YearDecorator {
    pub fn new(decoration: &YearDecoration) -> Self {
        Self {
            forms: decoration.years.iter().map(|&y| YearForms::new(y)).collect(),
            placements: decoration.placements,
        }
    }
}

impl Decoration for YearDecorator {
    fn name(&self) -> &'static str {
        "year"
    }

    fn decorate(&self, word: &str, batch: &mut Batch<'_>) {
        for year in &self.forms {
            if self.placements.begin {
                batch.push(format!("{}{}", year.two_digit, word));
                batch.push(format!("{}{}", year.full, word));
                batch.push(format!("{}{}", year.mid_three, word));
            }
            if self.placements.end {
                batch.push(format!("{}{}", word, year.two_digit));
                batch.push(format!("{}{}", word, year.full));
                batch.push(format!("{}{}", word, year.mid_three));
            }
            if self.placements.split {
                batch.push(format!("{}{}{}", year.first_two, word, year.two_digit));
            }
        }
    }
}

pub struct AgeDecorator {
    ages: Vec<String>,
    placements: AgePlacements,
}

impl AgeDecorator {
    pub fn new(decoration: &AgeDecoration) -> Self {
        Self {
            ages: decoration.ages.iter().map(u32::to_string).collect(),
            placements: decoration.placements,
        }
    }
}

impl Decoration for AgeDecorator {
    fn name(&self) -> &'static str {
        "age"
    }

    fn decorate(&self, word: &str, batch: &mut Batch<'_>) {
        for age in &self.ages {
            if self.placements.start {
                batch.push(format!("{}{}", age, word));
            }
            if self.placements.end {
                batch.push(format!("{}{}", word, age));
            }
        }
    }
}

/// Run one decoration over every word of the snapshot, one unit of work per index
pub fn run_decoration(
    decoration: &dyn Decoration,
    words: &[String],
    bounds: &LengthBounds,
    pool: &WorkerPool,
) -> Result<Vec<String>, PoolError> {
    let decorated = pool.run(0..words.len(), |index, batch| {
        let word = &words[index];
        if bounds.exceeds_max(word) {
            return;
        }
        decoration.decorate(word, batch);
    })?;

    log::debug!(
        "{} decoration produced {} words from {} candidates",
        decoration.name(),
        decorated.len(),
        words.len()
    );

    Ok(decorated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decorate_all(decoration: &dyn Decoration, input: &[&str], bounds: LengthBounds) -> Vec<String> {
        let words: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        let pool = WorkerPool::new(decoration.name(), 2);
        run_decoration(decoration, &words, &bounds, &pool).unwrap()
    }

    #[test]
    fn test_year_forms() {
        let forms = YearForms::new(1999);
        assert_eq!(forms.full, "1999");
        assert_eq!(forms.two_digit, "99");
        assert_eq!(forms.mid_three, "999");
        assert_eq!(forms.first_two, "19");
    }

    #[test]
    fn test_year_all_placements() {
        let decorator = YearDecorator::new(&YearDecoration {
            years: vec![1999],
            placements: YearPlacements::ALL,
        });
        let out = decorate_all(&decorator, &["pwd"], LengthBounds::default());

        assert_eq!(
            out,
            vec!["99pwd", "1999pwd", "999pwd", "pwd99", "pwd1999", "pwd999", "19pwd99"]
        );
    }

    #[test]
    fn test_year_single_placement_over_range() {
        let decorator = YearDecorator::new(&YearDecoration {
            years: vec![2000, 2001],
            placements: YearPlacements { begin: false, end: false, split: true },
        });
        let out = decorate_all(&decorator, &["x"], LengthBounds::default());
        assert_eq!(out, vec!["20x00", "20x01"]);
    }

    #[test]
    fn test_age_both_placements() {
        let decorator = AgeDecorator::new(&AgeDecoration {
            ages: vec![25],
            placements: AgePlacements::BOTH,
        });
        let out = decorate_all(&decorator, &["pwd"], LengthBounds::default());
        assert_eq!(out, vec!["25pwd", "pwd25"]);
    }

    #[test]
    fn test_length_precheck_uses_undecorated_word() {
        let decorator = AgeDecorator::new(&AgeDecoration {
            ages: vec![30],
            placements: AgePlacements { start: false, end: true },
        });
        let bounds = LengthBounds { min: None, max: Some(4) };
        let mut out = decorate_all(&decorator, &["abcd", "abcde"], bounds);
        out.sort();

        // "abcd" fits and is decorated beyond the bound, "abcde" is skipped
        assert_eq!(out, vec!["abcd30"]);
    }
}
