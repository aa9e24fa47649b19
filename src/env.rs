use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

/// Represents a finite Markov decision process with precomputed dynamics, in
/// which a tabular agent can operate.
///
/// States and actions are opaque indices in `[0, num_states)` and
/// `[0, num_actions)`. The environment owns the transition distribution and
/// the deterministic reward function; the agent only ever samples and reads
/// them.
pub trait Environment {
    /// Number of states, fixing the row count of all agent tables
    fn num_states(&self) -> usize;

    /// Number of actions available in every state
    fn num_actions(&self) -> usize;

    /// Probability distribution over next states for taking `action` in `state`
    ///
    /// Each defined row sums to 1. A row summing to 0 marks an undefined
    /// pair that must never be sampled.
    fn transition_probs(&self, state: usize, action: usize) -> &[f32];

    /// Deterministic reward for taking `action` in `state`
    fn reward(&self, state: usize, action: usize) -> i32;

    /// The state an episode begins in
    fn start_state(&self) -> usize;

    /// The state that triggers a reset back to [`start_state`](Environment::start_state)
    fn goal_state(&self) -> usize;

    /// Coordinate embedding of a state, used by distance-weighted exploration
    fn coords(&self, state: usize) -> (f32, f32);

    /// Sample a next state from the transition distribution for (`state`, `action`)
    ///
    /// **Panics** if the transition row sums to zero, which is a
    /// configuration error rather than a recoverable condition.
    fn sample_transition<R: Rng + ?Sized>(
        &self,
        state: usize,
        action: usize,
        rng: &mut R,
    ) -> usize {
        let dist = WeightedIndex::new(self.transition_probs(state, action))
            .expect("transition row must have positive mass");
        dist.sample(rng)
    }
}
