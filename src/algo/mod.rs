pub mod dyna;

pub use dyna::{DynaAgent, DynaAgentConfig};
