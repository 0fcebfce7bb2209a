//! Word combination stage
//!
//! Builds every ordered arrangement of distinct pool positions, where the pool is the
//! transformed word list plus one separator. One unit of work per separator.

use crate::config::{char_len, LengthBounds};
use crate::pool::{Batch, PoolError, WorkerPool};

/// Parameters of the combination stage
#[derive(Debug, Clone)]
pub struct Combiner {
    separators: Vec<String>,
    max_arity: usize,
    bounds: LengthBounds,
}

impl Combiner {
    pub fn new(separators: Vec<String>, max_arity: usize, bounds: LengthBounds) -> Self {
        Self {
            separators,
            max_arity,
            bounds,
        }
    }

    /// Run the stage and return `words` followed by every surviving arrangement
    pub fn combine(&self, words: Vec<String>, pool: &WorkerPool) -> Result<Vec<String>, PoolError> {
        // Workers share a read-only borrow of the transformed words for the whole stage
        let combined = pool.run(self.separators.iter(), |separator, batch| {
            self.combine_with(&words, separator, batch);
        })?;

        log::debug!(
            "Combination produced {} words from {} separator(s)",
            combined.len(),
            self.separators.len()
        );

        let mut output = words;
        output.extend(combined);
        Ok(output)
    }

    /// All arrangements of arity 2..=max_arity over `words` plus `separator`
    pub fn combine_with(&self, words: &[String], separator: &str, batch: &mut Batch<'_>) {
        let mut elements: Vec<&str> = words.iter().map(String::as_str).collect();
        elements.push(separator);

        let mut arranger = Arranger::new(&elements, self.bounds.max);
        for arity in 2..=self.max_arity {
            arranger.arrange(arity, &mut |word| batch.push(word));
        }
    }
}

/// Depth-first generator of k-permutations of element positions.
///
/// Arrangements are produced in lexicographic order of positions. Partial
/// arrangements already longer than `max_len` are abandoned since extending
/// them can only make them longer.
struct Arranger<'a> {
    elements: &'a [&'a str],
    lengths: Vec<usize>,
    max_len: Option<usize>,
    used: Vec<bool>,
    current: String,
}

impl<'a> Arranger<'a> {
    fn new(elements: &'a [&'a str], max_len: Option<usize>) -> Self {
        Self {
            elements,
            lengths: elements.iter().map(|e| char_len(e)).collect(),
            max_len,
            used: vec![false; elements.len()],
            current: String::new(),
        }
    }

    fn arrange(&mut self, arity: usize, emit: &mut dyn FnMut(String)) {
        if arity == 0 || arity > self.elements.len() {
            return;
        }
        self.current.clear();
        self.extend(arity, 0, emit);
    }

    fn extend(&mut self, remaining: usize, current_len: usize, emit: &mut dyn FnMut(String)) {
        if remaining == 0 {
            emit(self.current.clone());
            return;
        }

        for i in 0..self.elements.len() {
            if self.used[i] {
                continue;
            }
            let len = current_len + self.lengths[i];
            if self.max_len.is_some_and(|max| len > max) {
                continue;
            }

            let mark = self.current.len();
            self.used[i] = true;
            self.current.push_str(self.elements[i]);

            self.extend(remaining - 1, len, emit);

            self.current.truncate(mark);
            self.used[i] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn combine_one(combiner: &Combiner, input: &[&str], separator: &str) -> Vec<String> {
        let pool = WorkerPool::new("test", 1);
        pool.run([separator], |sep, batch| combiner.combine_with(&words(input), sep, batch))
            .unwrap()
    }

    #[test]
    fn test_pairs_with_separator() {
        let combiner = Combiner::new(Vec::new(), 2, LengthBounds::default());
        let out = combine_one(&combiner, &["A", "B"], "-");

        assert_eq!(out, words(&["AB", "A-", "BA", "B-", "-A", "-B"]));
    }

    #[test]
    fn test_max_length_excludes_long_arrangements() {
        let bounds = LengthBounds { min: None, max: Some(5) };
        let combiner = Combiner::new(Vec::new(), 2, bounds);
        let out = combine_one(&combiner, &["abc", "de", "fghij"], "_");

        assert!(out.contains(&"abcde".to_string()));
        assert!(!out.contains(&"_fghij".to_string()));
        assert!(out.iter().all(|w| w.chars().count() <= 5));
    }

    #[test]
    fn test_arity_larger_than_pool() {
        let combiner = Combiner::new(Vec::new(), 3, LengthBounds::default());
        // Pool is ["x", ""]: arity 2 gives two arrangements, arity 3 none
        let out = combine_one(&combiner, &["x"], "");
        assert_eq!(out, words(&["x", "x"]));
    }

    #[test]
    fn test_arity_three_permutation_count() {
        let combiner = Combiner::new(Vec::new(), 3, LengthBounds::default());
        let out = combine_one(&combiner, &["a", "b", "c"], "-");
        // P(4,2) + P(4,3)
        assert_eq!(out.len(), 12 + 24);
        assert!(out.contains(&"c-a".to_string()));
    }

    #[test]
    fn test_combine_appends_to_transformed_words() {
        let separators = vec![String::new(), "-".to_string()];
        let combiner = Combiner::new(separators, 2, LengthBounds::default());
        let pool = WorkerPool::new("test", 2);

        let out = combiner.combine(words(&["abc"]), &pool).unwrap();

        assert_eq!(out[0], "abc");
        let mut rest = out[1..].to_vec();
        rest.sort();
        assert_eq!(rest, words(&["-abc", "abc", "abc", "abc-"]));
    }
}
