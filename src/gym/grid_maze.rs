use std::collections::HashSet;

use thiserror::Error;

use crate::env::Environment;

/// The four movement actions on the lattice
pub const NUM_ACTIONS: usize = 4;

const UP: usize = 0;
const DOWN: usize = 1;
const LEFT: usize = 2;
const RIGHT: usize = 3;

/// Configuration for a [`GridMaze`]
///
/// States are indexed row-major: state `s` sits at row `s / width`, column
/// `s % width`.
#[derive(Debug, Clone)]
pub struct GridMazeConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// States that cannot be entered; moving into one leaves the state unchanged
    pub blocked_states: Vec<usize>,
    /// The state every episode begins in
    pub start_state: usize,
    /// The state that delivers `reward_at_goal` on entry and resets the agent
    pub goal_state: usize,
    /// Reward delivered by any action that lands in the goal state
    pub reward_at_goal: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridMazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("state {state} is out of bounds for a maze with {num_states} states")]
    StateOutOfBounds { state: usize, num_states: usize },
    #[error("the {role} state {state} must not be blocked")]
    BlockedEndpoint { role: &'static str, state: usize },
    #[error("start and goal must be distinct states, both are {state}")]
    StartIsGoal { state: usize },
}

impl GridMazeConfig {
    /// Validate the configuration and build the maze, precomputing its
    /// transition and reward tables
    pub fn build(self) -> Result<GridMaze, GridMazeError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridMazeError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }

        let num_states = self.width * self.height;
        for &state in self
            .blocked_states
            .iter()
            .chain([&self.start_state, &self.goal_state])
        {
            if state >= num_states {
                return Err(GridMazeError::StateOutOfBounds { state, num_states });
            }
        }

        let blocked: HashSet<usize> = self.blocked_states.iter().copied().collect();
        for (role, state) in [("start", self.start_state), ("goal", self.goal_state)] {
            if blocked.contains(&state) {
                return Err(GridMazeError::BlockedEndpoint { role, state });
            }
        }
        if self.start_state == self.goal_state {
            return Err(GridMazeError::StartIsGoal {
                state: self.start_state,
            });
        }

        Ok(GridMaze::generate(self, blocked))
    }
}

/// A `width` x `height` lattice maze with four movement actions
///
/// Moving off the edge or into a blocked state leaves the state unchanged
/// with zero reward; any move landing in the goal state delivers the
/// configured reward. Dynamics are precomputed into dense one-hot transition
/// rows and a deterministic reward table.
#[derive(Debug)]
pub struct GridMaze {
    width: usize,
    num_states: usize,
    start_state: usize,
    goal_state: usize,
    /// `num_states * NUM_ACTIONS` one-hot rows of length `num_states`
    t: Vec<f32>,
    /// `num_states * NUM_ACTIONS` deterministic rewards
    r: Vec<i32>,
}

impl GridMaze {
    fn generate(config: GridMazeConfig, blocked: HashSet<usize>) -> Self {
        let num_states = config.width * config.height;
        let mut maze = Self {
            width: config.width,
            num_states,
            start_state: config.start_state,
            goal_state: config.goal_state,
            t: vec![0.0; num_states * NUM_ACTIONS * num_states],
            r: vec![0; num_states * NUM_ACTIONS],
        };

        for s in 0..num_states {
            for a in 0..NUM_ACTIONS {
                let s1 = maze.next_state(s, a, &blocked);
                maze.t[(s * NUM_ACTIONS + a) * num_states + s1] = 1.0;
                // only entering the goal pays; a self-loop at the goal does not
                if s1 == config.goal_state && s1 != s {
                    maze.r[s * NUM_ACTIONS + a] = config.reward_at_goal;
                }
            }
        }

        maze
    }

    /// Deterministic movement on the lattice: boundary and blocked moves
    /// leave the state unchanged
    fn next_state(&self, s: usize, a: usize, blocked: &HashSet<usize>) -> usize {
        let (i, j) = (s / self.width, s % self.width);
        let height = self.num_states / self.width;

        let (i1, j1) = match a {
            UP if i == 0 => return s,
            UP => (i - 1, j),
            DOWN if i == height - 1 => return s,
            DOWN => (i + 1, j),
            LEFT if j == 0 => return s,
            LEFT => (i, j - 1),
            RIGHT if j == self.width - 1 => return s,
            RIGHT => (i, j + 1),
            _ => unreachable!("action index out of range"),
        };

        let s1 = i1 * self.width + j1;
        if blocked.contains(&s1) {
            s
        } else {
            s1
        }
    }
}

impl Environment for GridMaze {
    fn num_states(&self) -> usize {
        self.num_states
    }

    fn num_actions(&self) -> usize {
        NUM_ACTIONS
    }

    fn transition_probs(&self, state: usize, action: usize) -> &[f32] {
        let i = (state * NUM_ACTIONS + action) * self.num_states;
        &self.t[i..i + self.num_states]
    }

    fn reward(&self, state: usize, action: usize) -> i32 {
        self.r[state * NUM_ACTIONS + action]
    }

    fn start_state(&self) -> usize {
        self.start_state
    }

    fn goal_state(&self) -> usize {
        self.goal_state
    }

    fn coords(&self, state: usize) -> (f32, f32) {
        ((state / self.width) as f32, (state % self.width) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze_3x3() -> GridMaze {
        // 0 1 2
        // 3 # 5     (# = blocked state 4)
        // 6 7 8     goal at 8
        GridMazeConfig {
            width: 3,
            height: 3,
            blocked_states: vec![4],
            start_state: 0,
            goal_state: 8,
            reward_at_goal: 10,
        }
        .build()
        .unwrap()
    }

    fn destination(maze: &GridMaze, s: usize, a: usize) -> usize {
        let row = maze.transition_probs(s, a);
        assert!(
            (row.iter().sum::<f32>() - 1.0).abs() < 1e-6,
            "row is normalized"
        );
        row.iter().position(|&p| p == 1.0).expect("row is one-hot")
    }

    #[test]
    fn movement_geometry() {
        let maze = maze_3x3();

        assert_eq!(destination(&maze, 0, RIGHT), 1, "right moves one column");
        assert_eq!(destination(&maze, 0, DOWN), 3, "down moves one row");
        assert_eq!(destination(&maze, 5, UP), 2, "up moves one row back");
        assert_eq!(destination(&maze, 7, LEFT), 6, "left moves one column back");
    }

    #[test]
    fn boundary_and_blocked_moves_self_loop() {
        let maze = maze_3x3();

        assert_eq!(destination(&maze, 0, UP), 0, "top edge blocks up");
        assert_eq!(destination(&maze, 0, LEFT), 0, "left edge blocks left");
        assert_eq!(destination(&maze, 8, DOWN), 8, "bottom edge blocks down");
        assert_eq!(destination(&maze, 2, RIGHT), 2, "right edge blocks right");
        assert_eq!(destination(&maze, 1, DOWN), 1, "blocked state cannot be entered");
        assert_eq!(destination(&maze, 3, RIGHT), 3, "blocked state blocks from all sides");
    }

    #[test]
    fn reward_only_on_goal_entry() {
        let maze = maze_3x3();

        assert_eq!(maze.reward(7, RIGHT), 10, "entering the goal pays the reward");
        assert_eq!(maze.reward(5, DOWN), 10, "any entry direction pays");
        assert_eq!(maze.reward(7, LEFT), 0, "other moves pay nothing");
        assert_eq!(maze.reward(0, UP), 0, "self-loops pay nothing");
        assert_eq!(maze.reward(8, DOWN), 0, "staying on the goal pays nothing");
        assert_eq!(maze.reward(8, RIGHT), 0, "goal edge self-loops pay nothing");
    }

    #[test]
    fn coords_are_row_major() {
        let maze = maze_3x3();
        assert_eq!(maze.coords(0), (0.0, 0.0));
        assert_eq!(maze.coords(5), (1.0, 2.0));
        assert_eq!(maze.coords(7), (2.0, 1.0));
    }

    #[test]
    fn config_validation() {
        let base = GridMazeConfig {
            width: 3,
            height: 3,
            blocked_states: vec![4],
            start_state: 0,
            goal_state: 8,
            reward_at_goal: 10,
        };

        let err = GridMazeConfig {
            width: 0,
            ..base.clone()
        }
        .build()
        .unwrap_err();
        assert_eq!(err, GridMazeError::EmptyGrid { width: 0, height: 3 });

        let err = GridMazeConfig {
            goal_state: 9,
            ..base.clone()
        }
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            GridMazeError::StateOutOfBounds {
                state: 9,
                num_states: 9
            }
        );

        let err = GridMazeConfig {
            start_state: 4,
            ..base.clone()
        }
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            GridMazeError::BlockedEndpoint {
                role: "start",
                state: 4
            }
        );

        let err = GridMazeConfig {
            start_state: 8,
            ..base.clone()
        }
        .build()
        .unwrap_err();
        assert_eq!(err, GridMazeError::StartIsGoal { state: 8 });

        assert!(base.build().is_ok(), "valid config builds");
    }
}
