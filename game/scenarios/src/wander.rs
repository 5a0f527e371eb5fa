use std::f32::consts::PI;

use common::*;
use steering::{downgrade, Agent, FullLimiter, Limiter};

use crate::helpers::{random_seed, rng_for, wander_from_config};
use crate::scenario::{Crowd, Scenario, ScenarioError, SharedAgent, World};

/// A single agent turning independently while it wanders around the middle of the world
pub struct WanderScenario {
    world: World,
    crowd: Crowd,
}

impl WanderScenario {
    pub fn new(config: &config::Config) -> Result<Self, ScenarioError> {
        let world = World::from_config(&config.simulation)?;
        let seed = random_seed(&config.simulation);
        let cfg = &config.wander;

        let limiter = FullLimiter::new(
            cfg.max_speed,
            cfg.max_linear_acceleration,
            cfg.max_rotation,
            cfg.max_angular_acceleration,
        );
        let agent = Agent::new(world.centre(), 10.0, limiter)
            .with_independent_facing(true)
            .with_orientation(rng_for(seed, 0).gen_range(-PI, PI))
            .into_shared();

        let wander = wander_from_config(downgrade(&agent), cfg, rng_for(seed, 1));

        let mut crowd = Crowd::default();
        crowd.push(agent, Box::new(wander));

        Ok(Self { world, crowd })
    }
}

impl Scenario for WanderScenario {
    fn name(&self) -> &'static str {
        "wander"
    }

    fn tick(&mut self, dt: f32) {
        self.crowd.tick(&self.world, dt);
    }

    fn agents(&self) -> &[SharedAgent] {
        self.crowd.agents()
    }

    fn retune(&mut self, config: &config::Config) {
        let cfg = &config.wander;
        for agent in self.crowd.agents() {
            agent.borrow_mut().set_max_linear_speed(cfg.max_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use steering::Steerable;

    use super::*;

    fn config() -> config::Config {
        let mut config = config::Config::default();
        config.simulation.random_seed = Some(1234);
        config
    }

    #[test]
    fn wanders_within_limits() {
        let config = config();
        let mut scenario = WanderScenario::new(&config).expect("valid config");
        let dt = 1.0 / config.simulation.ticks_per_second as f32;

        let start = scenario.agents()[0].borrow().position();
        for _ in 0..300 {
            scenario.tick(dt);

            let agent = scenario.agents()[0].borrow();
            assert!(agent.linear_velocity().length() <= agent.max_linear_speed() + 1e-3);
            assert!(agent.angular_velocity().abs() <= agent.max_angular_speed() + 1e-3);
            assert!(agent.orientation().abs() <= PI + 1e-4);
        }

        let end = scenario.agents()[0].borrow().position();
        assert_ne!(start, end);
    }

    #[test]
    fn same_seed_same_walk() {
        let config = config();
        let mut a = WanderScenario::new(&config).expect("valid config");
        let mut b = WanderScenario::new(&config).expect("valid config");

        for _ in 0..100 {
            a.tick(0.1);
            b.tick(0.1);
        }

        let a = a.agents()[0].borrow().position();
        let b = b.agents()[0].borrow().position();
        assert_eq!(a, b);
    }
}
