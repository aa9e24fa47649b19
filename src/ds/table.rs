use std::ops::{Index, IndexMut};

/// A dense table with one `f32` cell per (state, action) pair
///
/// Rows are states, columns are actions, stored in one flat row-major `Vec`.
/// Backs both the Q-value table and the visitation counter, which need
/// cheap whole-table sweeps and row maxima over the full state-action space.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    data: Vec<f32>,
    num_states: usize,
    num_actions: usize,
}

impl Table {
    /// Construct a zeroed `num_states` x `num_actions` table
    pub fn zeros(num_states: usize, num_actions: usize) -> Self {
        Self {
            data: vec![0.0; num_states * num_actions],
            num_states,
            num_actions,
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Get a view of one state's row of action values
    pub fn row(&self, state: usize) -> &[f32] {
        let i = state * self.num_actions;
        &self.data[i..i + self.num_actions]
    }

    /// Maximum value in one state's row
    pub fn row_max(&self, state: usize) -> f32 {
        self.row(state)
            .iter()
            .copied()
            .max_by(|a, b| a.partial_cmp(b).expect("table values are not NaN"))
            .expect("every state has at least one action")
    }

    /// Reset every cell to zero
    pub fn reset(&mut self) {
        self.data.fill(0.0);
    }
}

impl Index<(usize, usize)> for Table {
    type Output = f32;

    fn index(&self, (state, action): (usize, usize)) -> &Self::Output {
        &self.data[state * self.num_actions + action]
    }
}

impl IndexMut<(usize, usize)> for Table {
    fn index_mut(&mut self, (state, action): (usize, usize)) -> &mut Self::Output {
        &mut self.data[state * self.num_actions + action]
    }
}
