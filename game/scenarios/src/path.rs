use common::*;
use steering::behaviour::FollowPath;
use steering::path::LinePath;
use steering::{downgrade, Agent, FullLimiter, Limiter};

use crate::scenario::{Crowd, Scenario, ScenarioError, SharedAgent, World};

/// A single agent lapping a closed path
pub struct PathScenario {
    world: World,
    crowd: Crowd,
}

impl PathScenario {
    pub fn new(config: &config::Config) -> Result<Self, ScenarioError> {
        let world = World::from_config(&config.simulation)?;
        let cfg = &config.path;

        let waypoints = cfg
            .waypoints
            .iter()
            .map(|&(x, y)| vec2(x, y))
            .collect_vec();
        let path = LinePath::new(&waypoints)?;

        let agent = Agent::new(
            waypoints[0],
            10.0,
            FullLimiter::new(cfg.max_speed, cfg.max_linear_acceleration, 0.0, 0.0),
        )
        .into_shared();

        let follow = FollowPath::new(downgrade(&agent), path, cfg.path_offset)
            .with_prediction_time(cfg.prediction_time)
            .with_max_linear_acceleration(cfg.max_linear_acceleration);

        let mut crowd = Crowd::default();
        crowd.push(agent, Box::new(follow));

        Ok(Self { world, crowd })
    }
}

impl Scenario for PathScenario {
    fn name(&self) -> &'static str {
        "path"
    }

    fn tick(&mut self, dt: f32) {
        self.crowd.tick(&self.world, dt);
    }

    fn agents(&self) -> &[SharedAgent] {
        self.crowd.agents()
    }

    fn retune(&mut self, config: &config::Config) {
        let cfg = &config.path;
        for agent in self.crowd.agents() {
            let mut agent = agent.borrow_mut();
            agent.set_max_linear_speed(cfg.max_speed);
            agent.set_max_linear_acceleration(cfg.max_linear_acceleration);
        }
    }
}
