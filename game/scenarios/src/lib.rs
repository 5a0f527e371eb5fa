//! Headless demo scenarios driving the steering behaviours, built from the game config

pub use crate::registry::{all_names, resolve, ScenarioConstructor, DEFAULT_SCENARIO};
pub use crate::scenario::{current_tick, next_tick, Crowd, Scenario, ScenarioError, SharedAgent, World};

pub use crate::flocking::Flocking;
pub use crate::hide::{HideMode, HideScenario};
pub use crate::path::PathScenario;
pub use crate::wander::WanderScenario;

mod flocking;
mod helpers;
mod hide;
mod path;
mod registry;
mod scenario;
mod wander;
