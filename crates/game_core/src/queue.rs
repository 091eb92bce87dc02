use std::collections::VecDeque;

use rand::{rngs::StdRng, seq::SliceRandom};

/// Shuffled words waiting to be shown. When it runs dry it is refilled with a
/// fresh permutation of the full original list, never of what is left over.
#[derive(Debug, Clone)]
pub struct WordQueue {
    source: Vec<String>,
    pending: VecDeque<String>,
    rng: StdRng,
}

impl WordQueue {
    /// Returns `None` for an empty list, which could never produce a word.
    pub fn new(words: Vec<String>, rng: StdRng) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        let mut queue = Self {
            source: words,
            pending: VecDeque::new(),
            rng,
        };
        queue.refill();
        Some(queue)
    }

    pub fn next_word(&mut self) -> String {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending
            .pop_front()
            .expect("word queue refilled from a non-empty source")
    }

    /// Words left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn source(&self) -> &[String] {
        &self.source
    }

    fn refill(&mut self) {
        let mut words = self.source.clone();
        words.shuffle(&mut self.rng);
        self.pending = words.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn sorted(mut list: Vec<String>) -> Vec<String> {
        list.sort();
        list
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(WordQueue::new(Vec::new(), StdRng::seed_from_u64(1)).is_none());
    }

    #[test]
    fn one_pass_visits_every_word_once() {
        let source = words(&["cat", "dog", "fish", "owl", "ant", "bee", "cow"]);
        for seed in 0..20 {
            let mut queue =
                WordQueue::new(source.clone(), StdRng::seed_from_u64(seed)).expect("queue");
            let drawn: Vec<String> = (0..source.len()).map(|_| queue.next_word()).collect();
            assert_eq!(sorted(drawn), sorted(source.clone()), "seed {seed}");
            assert_eq!(queue.remaining(), 0);
        }
    }

    #[test]
    fn refill_is_a_permutation_of_the_original_list() {
        let source = words(&["cat", "dog", "fish"]);
        let mut queue = WordQueue::new(source.clone(), StdRng::seed_from_u64(7)).expect("queue");
        queue.next_word();
        queue.next_word();
        queue.next_word();

        let second_pass: Vec<String> = (0..3).map(|_| queue.next_word()).collect();
        assert_eq!(sorted(second_pass), sorted(source));
    }

    #[test]
    fn partial_pass_then_refill_still_uses_full_list() {
        let source = words(&["cat", "dog", "fish", "owl"]);
        let mut queue = WordQueue::new(source.clone(), StdRng::seed_from_u64(3)).expect("queue");
        for _ in 0..4 {
            queue.next_word();
        }
        queue.next_word();
        assert_eq!(queue.remaining(), 3);
        assert_eq!(queue.source(), source.as_slice());
    }

    #[test]
    fn single_word_repeats_forever() {
        let mut queue = WordQueue::new(words(&["cat"]), StdRng::seed_from_u64(0)).expect("queue");
        for _ in 0..5 {
            assert_eq!(queue.next_word(), "cat");
        }
    }
}
