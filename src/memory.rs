use rand::Rng;

/// A single real or replayed transition in the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The state the action was taken in
    pub state: usize,
    /// The action taken
    pub action: usize,
    /// The reward received
    pub reward: i32,
    /// The state the environment landed in
    pub next_state: usize,
}

/// A tabular world model holding the most recent observed outcome for every
/// (state, action) pair
///
/// This is not a ring buffer of events: there is exactly one slot per pair,
/// and [`record`](ExperienceModel::record) overwrites it unconditionally, so
/// the model always reflects the single latest outcome. Before a pair has
/// been visited its slot holds a self-loop with zero reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceModel {
    entries: Vec<Transition>,
    num_actions: usize,
}

impl ExperienceModel {
    /// Construct a model over the full state-action space, every slot
    /// initialized to the self-loop default
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        let mut model = Self {
            entries: Vec::with_capacity(num_states * num_actions),
            num_actions,
        };
        model.fill_defaults(num_states);
        model
    }

    fn fill_defaults(&mut self, num_states: usize) {
        self.entries.clear();
        for state in 0..num_states {
            for action in 0..self.num_actions {
                self.entries.push(Transition {
                    state,
                    action,
                    reward: 0,
                    next_state: state,
                });
            }
        }
    }

    /// Overwrite the slot for (`t.state`, `t.action`) with `t`
    pub fn record(&mut self, t: Transition) {
        self.entries[t.state * self.num_actions + t.action] = t;
    }

    /// The stored outcome for a (state, action) pair
    pub fn get(&self, state: usize, action: usize) -> Transition {
        self.entries[state * self.num_actions + action]
    }

    /// Draw one slot uniformly at random over the whole state-action space,
    /// never-visited self-loop defaults included
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Transition {
        self.entries[rng.gen_range(0..self.entries.len())]
    }

    /// Reset every slot to the self-loop default
    pub fn reset(&mut self) {
        let num_states = self.entries.len() / self.num_actions;
        self.fill_defaults(num_states);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_self_loops() {
        let model = ExperienceModel::new(3, 2);
        for state in 0..3 {
            for action in 0..2 {
                let t = model.get(state, action);
                assert_eq!(t.next_state, state, "default entry self-loops");
                assert_eq!(t.reward, 0, "default entry has zero reward");
            }
        }
    }

    #[test]
    fn record_overwrites_unconditionally() {
        let mut model = ExperienceModel::new(3, 2);
        let first = Transition {
            state: 1,
            action: 0,
            reward: 5,
            next_state: 2,
        };
        let second = Transition {
            state: 1,
            action: 0,
            reward: -3,
            next_state: 0,
        };

        model.record(first);
        assert_eq!(model.get(1, 0), first, "first outcome stored");

        model.record(second);
        assert_eq!(model.get(1, 0), second, "second outcome replaces the first");

        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let t = model.sample(&mut rng);
            if t.state == 1 && t.action == 0 {
                assert_eq!(t, second, "sampling only ever sees the latest outcome");
            }
        }
    }

    #[test]
    fn sample_covers_unvisited_pairs() {
        let model = ExperienceModel::new(2, 2);
        let mut rng = rand::thread_rng();
        let t = model.sample(&mut rng);
        assert_eq!(t.next_state, t.state, "unvisited pairs sample their default");
    }
}
