//! Tabular Dyna-Q reinforcement learning
//!
//! A Dyna-style agent learns action values online from real transitions,
//! mirrors every observed outcome into a tabular world model, and replays
//! randomly sampled model entries as background planning updates. A
//! visitation counter drives an exploration bonus that shapes both action
//! selection and the planning targets.

/// Implemented RL algorithms
pub mod algo;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Exploration bonus machinery
pub mod exploration;

/// Experience model (tabular world model)
pub mod memory;

/// Testing environments
pub mod gym;

mod util;
