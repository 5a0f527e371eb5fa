use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use steering::behaviour::{CollisionAvoidance, Hide, Wander};
use steering::combine::WeightedBlender;
use steering::proximity::{InfiniteProximity, Population, RadiusProximity};
use steering::{
    downgrade, Agent, FullLimiter, Limiter, Steerable, SteeringAcceleration, SteeringBehaviour,
};

use crate::helpers::{random_seed, rng_for, wander_from_config};
use crate::scenario::{Scenario, ScenarioError, SharedAgent, World};

const HIDER: usize = 0;
const THREAT: usize = 1;

/// Order of the hider's blended behaviours
const AVOID: usize = 0;
const HIDE: usize = 1;
const WANDER: usize = 2;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HideMode {
    Wandering,
    Hiding,
}

slog_value_debug!(HideMode);

/// An agent that wanders until a wandering threat comes close, then hides behind the nearest
/// obstacle
pub struct HideScenario {
    world: World,
    /// Hider then threat
    agents: Vec<SharedAgent>,
    obstacles: Vec<SharedAgent>,
    hider: WeightedBlender<Vec2>,
    /// Obstacles close enough to avoid
    nearby: Rc<RefCell<RadiusProximity<Vec2>>>,
    threat: Wander<Vec2>,
    threat_radius: f32,
    mode: HideMode,
    steering: [SteeringAcceleration<Vec2>; 2],
}

impl HideScenario {
    pub fn new(config: &config::Config) -> Result<Self, ScenarioError> {
        let world = World::from_config(&config.simulation)?;
        let seed = random_seed(&config.simulation);
        let cfg = &config.hide;
        let mut rng = rng_for(seed, 0);

        let obstacles = Population::new();
        let mut placed = Vec::with_capacity(cfg.obstacle_count);
        for _ in 0..cfg.obstacle_count {
            let pos = non_overlapping_position(&world, &placed, cfg.obstacle_radius, &mut rng);
            let obstacle = Agent::new(pos, cfg.obstacle_radius, FullLimiter::new(0.0, 0.0, 0.0, 0.0))
                .into_shared();
            obstacles.push(&obstacle);
            placed.push(obstacle);
        }

        let hider = Agent::new(
            world.random_position(&mut rng),
            10.0,
            FullLimiter::new(cfg.max_speed, cfg.max_linear_acceleration, 0.0, 0.0),
        )
        .into_shared();
        let threat = Agent::new(
            world.random_position(&mut rng),
            10.0,
            FullLimiter::new(
                config.wander.max_speed,
                config.wander.max_linear_acceleration,
                0.0,
                0.0,
            ),
        )
        .into_shared();

        let me = downgrade(&hider);
        let nearby = Rc::new(RefCell::new(RadiusProximity::new(
            me.clone(),
            obstacles.clone(),
            hider.borrow().bounding_radius() + cfg.distance_from_boundary * 0.5,
        )));
        let everywhere = Rc::new(RefCell::new(InfiniteProximity::new(me.clone(), obstacles)));

        let avoid = CollisionAvoidance::new(
            me.clone(),
            nearby.clone(),
            cfg.collision_avoidance_acceleration,
        );
        let hide = Hide::new(me.clone(), downgrade(&threat), everywhere)
            .with_distance_from_boundary(cfg.distance_from_boundary)
            .with_max_linear_acceleration(cfg.max_linear_acceleration)
            .with_max_speed(cfg.max_speed)
            .with_deceleration_radius(cfg.deceleration_radius)
            .with_arrival_tolerance(cfg.arrival_tolerance)
            .with_time_to_target(cfg.time_to_target);
        let wander = wander_from_config(me.clone(), &config.wander, rng_for(seed, 1))
            .with_max_angular_acceleration(0.0);

        let blender = WeightedBlender::new(me, f32::INFINITY, f32::INFINITY)
            .with(avoid, 1.0)
            .with(hide, 1.0)
            .with(wander, 1.0);

        let threat_wander = wander_from_config(downgrade(&threat), &config.wander, rng_for(seed, 2))
            .with_max_angular_acceleration(0.0);

        let mut scenario = Self {
            world,
            agents: vec![hider, threat],
            obstacles: placed,
            hider: blender,
            nearby,
            threat: threat_wander,
            threat_radius: cfg.threat_radius,
            mode: HideMode::Wandering,
            steering: [SteeringAcceleration::zero(); 2],
        };
        scenario.update_mode();
        Ok(scenario)
    }

    pub fn mode(&self) -> HideMode {
        self.mode
    }

    /// Hiding and wandering are mutually exclusive, chosen by the threat's distance
    fn update_mode(&mut self) {
        let hider = self.agents[HIDER].borrow().position();
        let threat = self.agents[THREAT].borrow().position();
        let mode = if hider.distance_squared(threat) < self.threat_radius * self.threat_radius {
            HideMode::Hiding
        } else {
            HideMode::Wandering
        };

        if mode != self.mode {
            debug!("hider changed mode"; "from" => self.mode, "to" => mode);
            self.mode = mode;
        }

        let hiding = mode == HideMode::Hiding;
        for (index, enabled) in [(HIDE, hiding), (WANDER, !hiding)].iter() {
            if let Some(child) = self.hider.get_mut(*index) {
                child.behaviour_mut().set_enabled(*enabled);
            }
        }
    }
}

/// Random position clear of every placed obstacle by at least a diameter
fn non_overlapping_position(
    world: &World,
    placed: &[SharedAgent],
    radius: f32,
    rng: &mut SmallRng,
) -> Vec2 {
    const ATTEMPTS: usize = 100;
    let min_distance = radius * 4.0;

    let mut pos = world.random_position(rng);
    for _ in 0..ATTEMPTS {
        let clear = placed
            .iter()
            .all(|o| o.borrow().position().distance(pos) >= min_distance);
        if clear {
            break;
        }
        pos = world.random_position(rng);
    }

    pos
}

impl Scenario for HideScenario {
    fn name(&self) -> &'static str {
        "hide"
    }

    fn tick(&mut self, dt: f32) {
        self.update_mode();

        let [hider, threat] = &mut self.steering;
        self.hider.calculate_steering(hider);
        self.threat.calculate_steering(threat);

        for (agent, steering) in self.agents.iter().zip(self.steering.iter()) {
            self.world.apply(agent, steering, dt);
        }
    }

    fn agents(&self) -> &[SharedAgent] {
        &self.agents
    }

    fn obstacles(&self) -> &[SharedAgent] {
        &self.obstacles
    }

    fn retune(&mut self, config: &config::Config) {
        let cfg = &config.hide;
        self.threat_radius = cfg.threat_radius;

        {
            let mut hider = self.agents[HIDER].borrow_mut();
            hider.set_max_linear_speed(cfg.max_speed);
            hider.set_max_linear_acceleration(cfg.max_linear_acceleration);

            self.nearby
                .borrow_mut()
                .set_radius(hider.bounding_radius() + cfg.distance_from_boundary * 0.5);
        }

        let mut threat = self.agents[THREAT].borrow_mut();
        threat.set_max_linear_speed(config.wander.max_speed);
        threat.set_max_linear_acceleration(config.wander.max_linear_acceleration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> HideScenario {
        let mut config = config::Config::default();
        config.simulation.random_seed = Some(99);
        HideScenario::new(&config).expect("valid config")
    }

    #[test]
    fn mode_follows_threat_distance() {
        logging::for_tests();
        let mut scenario = scenario();
        assert_eq!(scenario.obstacles().len(), 6);

        scenario.agents[HIDER].borrow_mut().set_position(vec2(10.0, 10.0));
        scenario.agents[THREAT].borrow_mut().set_position(vec2(600.0, 400.0));
        scenario.update_mode();
        assert_eq!(scenario.mode(), HideMode::Wandering);
        assert!(!scenario.hider.get(HIDE).expect("hide").behaviour().is_enabled());
        assert!(scenario.hider.get(WANDER).expect("wander").behaviour().is_enabled());

        scenario.agents[THREAT].borrow_mut().set_position(vec2(60.0, 60.0));
        scenario.update_mode();
        assert_eq!(scenario.mode(), HideMode::Hiding);
        assert!(scenario.hider.get(HIDE).expect("hide").behaviour().is_enabled());
        assert!(!scenario.hider.get(WANDER).expect("wander").behaviour().is_enabled());
        assert!(scenario.hider.get(AVOID).expect("avoid").behaviour().is_enabled());
    }

    #[test]
    fn ticks_without_degenerate_positions() {
        let mut scenario = scenario();
        for _ in 0..120 {
            scenario.tick(1.0 / 60.0);
        }

        for agent in scenario.agents() {
            assert!(!agent.borrow().position().is_nan());
        }
    }

    #[test]
    fn retune_updates_limits_and_avoidance() {
        let mut config = config::Config::default();
        config.simulation.random_seed = Some(99);
        let mut scenario = HideScenario::new(&config).expect("valid config");

        config.hide.max_speed = 12.0;
        config.hide.distance_from_boundary = 40.0;
        config.hide.threat_radius = 1.0;
        config.wander.max_speed = 3.0;
        scenario.retune(&config);

        assert_eq!(scenario.agents[HIDER].borrow().max_linear_speed(), 12.0);
        assert_eq!(scenario.agents[THREAT].borrow().max_linear_speed(), 3.0);
        assert_eq!(scenario.nearby.borrow().radius(), 10.0 + 20.0);

        scenario.agents[HIDER].borrow_mut().set_position(vec2(10.0, 10.0));
        scenario.agents[THREAT].borrow_mut().set_position(vec2(15.0, 10.0));
        scenario.update_mode();
        assert_eq!(scenario.mode(), HideMode::Wandering);
    }
}
