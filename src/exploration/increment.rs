use crate::env::Environment;

/// Strategy for how visitation staleness accumulates each decision step
///
/// When the agent takes an action in some state, every (state, action)
/// pair's staleness counter grows by a per-state amount supplied by this
/// strategy before the taken pair is zeroed.
pub trait VisitIncrement {
    /// Per-state staleness increments applied when `state` is visited
    ///
    /// **Returns** one increment per state; all of a state's actions grow by
    /// the same amount.
    fn increment_for(&self, state: usize) -> Vec<f32>;
}

/// Ordinary Dyna staleness: every pair ages by 1 per decision step
pub struct Uniform {
    num_states: usize,
}

impl Uniform {
    pub fn new(num_states: usize) -> Self {
        Self { num_states }
    }
}

impl VisitIncrement for Uniform {
    fn increment_for(&self, _state: usize) -> Vec<f32> {
        vec![1.0; self.num_states]
    }
}

/// Distance-weighted staleness: every pair ages by the Euclidean distance
/// between its state and the newly visited state, in the environment's
/// coordinate embedding
///
/// States near the visited one regain a null bonus faster than far ones.
pub struct DistanceWeighted {
    coords: Vec<(f32, f32)>,
}

impl DistanceWeighted {
    pub fn new(coords: Vec<(f32, f32)>) -> Self {
        Self { coords }
    }

    /// Capture the coordinate embedding of every state in `env`
    pub fn from_env<E: Environment>(env: &E) -> Self {
        Self::new((0..env.num_states()).map(|s| env.coords(s)).collect())
    }
}

impl VisitIncrement for DistanceWeighted {
    fn increment_for(&self, state: usize) -> Vec<f32> {
        let (i, j) = self.coords[state];
        self.coords
            .iter()
            .map(|&(i1, j1)| ((i1 - i).powi(2) + (j1 - j).powi(2)).sqrt())
            .collect()
    }
}
