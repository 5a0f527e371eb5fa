use crate::flocking::Flocking;
use crate::hide::HideScenario;
use crate::path::PathScenario;
use crate::scenario::{Scenario, ScenarioError};
use crate::wander::WanderScenario;

pub type ScenarioConstructor = fn(&config::Config) -> Result<Box<dyn Scenario>, ScenarioError>;

pub const DEFAULT_SCENARIO: &str = "flocking";

struct ScenarioEntry {
    name: &'static str,
    constructor: ScenarioConstructor,
}

inventory::collect!(ScenarioEntry);

/// None selects the default
pub fn resolve(name: Option<&str>) -> Option<(&'static str, ScenarioConstructor)> {
    let name = name.unwrap_or(DEFAULT_SCENARIO);
    inventory::iter::<ScenarioEntry>
        .into_iter()
        .find(|e| e.name == name)
        .map(|e| (e.name, e.constructor))
}

pub fn all_names() -> impl Iterator<Item = &'static str> {
    inventory::iter::<ScenarioEntry>.into_iter().map(|e| e.name)
}

macro_rules! scenario {
    ($name:expr, $ty:ty) => {
        inventory::submit! {
            ScenarioEntry {
                name: $name,
                constructor: |config| {
                    let scenario: Box<dyn Scenario> = Box::new(<$ty>::new(config)?);
                    Ok(scenario)
                },
            }
        }
    };
}

// -------------

scenario!("flocking", Flocking);
scenario!("wander", WanderScenario);
scenario!("hide", HideScenario);
scenario!("path", PathScenario);
