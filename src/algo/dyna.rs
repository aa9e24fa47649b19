use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    assert_interval,
    ds::Table,
    env::Environment,
    exploration::{VisitCounter, VisitIncrement},
    memory::{ExperienceModel, Transition},
};

/// Configuration for the [`DynaAgent`]
pub struct DynaAgentConfig {
    /// Learning rate - must be in the interval `[0,1]`
    pub alpha: f32,
    /// Discount factor - must be in the open interval `(0,1)`
    pub gamma: f32,
    /// Scale of the staleness exploration bonus - must be non-negative
    pub epsilon: f32,
}

impl Default for DynaAgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            gamma: 0.9,
            epsilon: 0.001,
        }
    }
}

/// A tabular Dyna-Q agent
///
/// Learns action values online with one-step Q-learning, mirrors every real
/// transition into an [`ExperienceModel`], and after each real step replays
/// randomly sampled model entries as planning updates. A [`VisitCounter`]
/// supplies a staleness bonus that biases both action selection and the
/// planning targets toward long-untaken pairs; real rewards are never
/// inflated by the bonus.
///
/// ### Generics
/// - `I` - The [`VisitIncrement`] strategy shaping how staleness accumulates
/// - `R` - The random source, owned by the agent so that seeded runs are
///   reproducible without touching a process-wide generator
pub struct DynaAgent<I: VisitIncrement, R: Rng = StdRng> {
    q: Table,
    model: ExperienceModel,
    counter: VisitCounter<I>,
    history: Vec<Transition>,
    alpha: f32,
    gamma: f32,
    epsilon: f32,
    state: usize,
    rng: R,
}

impl<I: VisitIncrement> DynaAgent<I, StdRng> {
    /// Initialize a new `DynaAgent` sized for a given environment, with an
    /// entropy-seeded random source
    ///
    /// **Panics** if `config.alpha` is not in the interval `[0,1]`, if
    /// `config.gamma` is not in the open interval `(0,1)`, or if
    /// `config.epsilon` is negative
    pub fn new<E: Environment>(env: &E, config: DynaAgentConfig, increment: I) -> Self {
        Self::with_rng(env, config, increment, StdRng::from_entropy())
    }

    /// Initialize a new `DynaAgent` with a deterministic seed, for
    /// reproducible runs
    pub fn from_seed<E: Environment>(
        env: &E,
        config: DynaAgentConfig,
        increment: I,
        seed: u64,
    ) -> Self {
        Self::with_rng(env, config, increment, StdRng::seed_from_u64(seed))
    }
}

impl<I: VisitIncrement, R: Rng> DynaAgent<I, R> {
    /// Initialize a new `DynaAgent` with a caller-provided random source
    pub fn with_rng<E: Environment>(
        env: &E,
        config: DynaAgentConfig,
        increment: I,
        rng: R,
    ) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert!(
            config.gamma > 0.0 && config.gamma < 1.0,
            "Invalid value for `gamma`. Must be in the open interval (0, 1)."
        );
        assert!(
            config.epsilon >= 0.0,
            "Invalid value for `epsilon`. Must be non-negative."
        );

        let num_states = env.num_states();
        let num_actions = env.num_actions();
        Self {
            q: Table::zeros(num_states, num_actions),
            model: ExperienceModel::new(num_states, num_actions),
            counter: VisitCounter::new(num_states, num_actions, increment),
            history: Vec::new(),
            alpha: config.alpha,
            gamma: config.gamma,
            epsilon: config.epsilon,
            state: env.start_state(),
            rng,
        }
    }

    /// Choose an action for the given state
    ///
    /// Maximizes `Q[s,a] + epsilon * sqrt(counter[s,a])`, breaking ties
    /// uniformly at random among all maximizers. With a single maximizer the
    /// choice is deterministic; randomness is about ties only.
    fn select_action(&mut self, state: usize) -> usize {
        let scores = self
            .q
            .row(state)
            .iter()
            .enumerate()
            .map(|(a, &q)| q + self.epsilon * self.counter.bonus(state, a))
            .collect::<Vec<_>>();

        let best = scores
            .iter()
            .copied()
            .max_by(|a, b| a.partial_cmp(b).expect("scores are not NaN"))
            .expect("every state has at least one action");

        let maximizers = scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score == best)
            .map(|(a, _)| a)
            .collect::<Vec<_>>();

        *maximizers
            .choose(&mut self.rng)
            .expect("at least one action maximizes")
    }

    /// Apply the one-step Q-learning update for a transition
    ///
    /// `bonus` adds `epsilon * sqrt(counter[s,a])` to the target; it is
    /// enabled for planning replay and disabled for real experience.
    fn learn(&mut self, t: &Transition, bonus: bool) {
        let bonus_term = if bonus {
            self.epsilon * self.counter.bonus(t.state, t.action)
        } else {
            0.0
        };
        let target = t.reward as f32 + bonus_term + self.gamma * self.q.row_max(t.next_state);
        let q = &mut self.q[(t.state, t.action)];
        *q += self.alpha * (target - *q);
    }

    /// Run `n` planning updates, each replaying one uniformly sampled model
    /// entry with the bonus enabled
    ///
    /// Planning only refines Q-values; the model, the counter, and the
    /// history are never touched. Succeeds before any real experience
    /// exists, replaying the model's self-loop defaults.
    fn plan(&mut self, n: usize) {
        for _ in 0..n {
            let t = self.model.sample(&mut self.rng);
            self.learn(&t, true);
        }
    }

    /// Zero all four mutable tables
    fn reset_tables(&mut self) {
        self.q.reset();
        self.model.reset();
        self.counter.reset();
        self.history.clear();
    }

    /// Run the agent in the given environment for a fixed number of decision
    /// steps
    ///
    /// Landing in the goal state resets the current state to the start state
    /// without terminating the run. Per step: select an action, sample the
    /// next state from the environment, read the reward, learn (no bonus),
    /// record the outcome in the model, age the visit counter, append to the
    /// history, then run `planning_updates` planning updates if given.
    ///
    /// ### Parameters
    /// - `num_steps` - Number of decision steps to simulate
    /// - `reset_agent` - Whether to zero all learned tables and return to the
    ///   start state before running
    /// - `planning_updates` - Number of planning updates after every real
    ///   step, or `None` for pure model-free learning
    pub fn simulate<E: Environment>(
        &mut self,
        env: &E,
        num_steps: usize,
        reset_agent: bool,
        planning_updates: Option<usize>,
    ) {
        if reset_agent {
            self.reset_tables();
            self.state = env.start_state();
            log::debug!("agent reset to start state {}", self.state);
        }

        log::debug!(
            "simulating {} steps with planning_updates = {:?}",
            num_steps,
            planning_updates
        );

        for _ in 0..num_steps {
            let state = self.state;
            let action = self.select_action(state);
            let next_state = env.sample_transition(state, action, &mut self.rng);
            let reward = env.reward(state, action);
            let t = Transition {
                state,
                action,
                reward,
                next_state,
            };

            self.learn(&t, false);
            self.model.record(t);
            self.counter.touch(state, action);
            self.history.push(t);

            if let Some(n) = planning_updates {
                self.plan(n);
            }

            self.state = if next_state == env.goal_state() {
                env.start_state()
            } else {
                next_state
            };
        }
    }

    /// Cumulative real reward collected prior to each move, indexed by step
    ///
    /// Non-decreasing whenever all historical rewards are non-negative.
    pub fn performance(&self) -> Vec<i64> {
        self.history
            .iter()
            .scan(0i64, |acc, t| {
                *acc += t.reward as i64;
                Some(*acc)
            })
            .collect()
    }

    /// Every real transition experienced since the last reset, in order
    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    pub fn q_table(&self) -> &Table {
        &self.q
    }
}
