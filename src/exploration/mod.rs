mod counter;
mod increment;

pub use counter::VisitCounter;
pub use increment::{DistanceWeighted, Uniform, VisitIncrement};
