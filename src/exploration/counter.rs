use crate::ds::Table;

use super::VisitIncrement;

/// Tracks per-(state, action) staleness and exposes it as an exploration bonus
///
/// The counter measures how long each pair has gone untaken. Taking an
/// action ages every pair by the strategy-supplied increment and then zeroes
/// exactly the taken pair, so the just-taken pair always ends a step at
/// exactly zero.
pub struct VisitCounter<I: VisitIncrement> {
    counts: Table,
    increment: I,
}

impl<I: VisitIncrement> VisitCounter<I> {
    pub fn new(num_states: usize, num_actions: usize, increment: I) -> Self {
        Self {
            counts: Table::zeros(num_states, num_actions),
            increment,
        }
    }

    /// Register that `action` was taken in `state`
    ///
    /// Ages every pair first, then zeroes (state, action), in that order.
    pub fn touch(&mut self, state: usize, action: usize) {
        let increments = self.increment.increment_for(state);
        for s in 0..self.counts.num_states() {
            for a in 0..self.counts.num_actions() {
                self.counts[(s, a)] += increments[s];
            }
        }
        self.counts[(state, action)] = 0.0;
    }

    /// The staleness bonus for a pair: the square root of its counter
    pub fn bonus(&self, state: usize, action: usize) -> f32 {
        self.counts[(state, action)].sqrt()
    }

    /// Raw counter value for a pair
    pub fn count(&self, state: usize, action: usize) -> f32 {
        self.counts[(state, action)]
    }

    /// Reset every counter to zero
    pub fn reset(&mut self) {
        self.counts.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::super::{DistanceWeighted, Uniform};
    use super::*;

    #[test]
    fn touch_ages_then_zeroes() {
        let mut counter = VisitCounter::new(2, 2, Uniform::new(2));

        counter.touch(0, 1);
        assert_eq!(counter.count(0, 1), 0.0, "taken pair ends at exactly zero");
        assert_eq!(counter.count(0, 0), 1.0, "untaken pairs aged by 1");
        assert_eq!(counter.count(1, 0), 1.0, "other states aged by 1");

        counter.touch(0, 1);
        counter.touch(0, 1);
        assert_eq!(counter.count(0, 1), 0.0, "repeat visits keep the pair at zero");
        assert_eq!(counter.count(1, 1), 3.0, "staleness accumulates monotonically");

        counter.touch(1, 1);
        assert_eq!(counter.count(1, 1), 0.0, "zeroing follows aging, not the reverse");
        assert_eq!(counter.count(0, 1), 1.0, "previously taken pair ages again");
    }

    #[test]
    fn bonus_is_sqrt_of_count() {
        let mut counter = VisitCounter::new(2, 1, Uniform::new(2));
        for _ in 0..4 {
            counter.touch(0, 0);
        }
        assert_eq!(counter.count(1, 0), 4.0);
        assert_eq!(counter.bonus(1, 0), 2.0, "bonus is the square root");
        assert_eq!(counter.bonus(0, 0), 0.0, "taken pair has no bonus");
    }

    #[test]
    fn distance_weighted_ages_by_distance() {
        // two states one unit apart
        let inc = DistanceWeighted::new(vec![(0.0, 0.0), (0.0, 1.0)]);
        let mut counter = VisitCounter::new(2, 1, inc);

        counter.touch(0, 0);
        assert_eq!(counter.count(0, 0), 0.0, "taken pair zeroed");
        assert_eq!(counter.count(1, 0), 1.0, "far state aged by its distance");

        counter.touch(1, 0);
        assert_eq!(counter.count(0, 0), 1.0, "aging measured from the new state");
        assert_eq!(counter.count(1, 0), 0.0);
    }
}
