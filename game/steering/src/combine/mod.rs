//! Behaviours made of other behaviours
pub use blend::{BehaviourAndWeight, WeightedBlender};
pub use priority::PrioritySteering;

mod blend;
mod priority;
