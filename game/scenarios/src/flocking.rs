use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use common::*;
use steering::behaviour::{Alignment, Cohesion, Separation};
use steering::combine::{PrioritySteering, WeightedBlender};
use steering::proximity::{FieldOfViewProximity, Population, ProximityRef};
use steering::{downgrade, Agent, FullLimiter, Limiter};

use crate::helpers::{random_seed, rng_for, wander_from_config};
use crate::scenario::{Crowd, Scenario, ScenarioError, SharedAgent, World};

/// Agents that align with, stay close to and keep apart from those in view. Lone agents wander
/// until they find company
pub struct Flocking {
    world: World,
    crowd: Crowd,
    /// One per agent, shared by its three group behaviours
    proximities: Vec<Rc<RefCell<FieldOfViewProximity<Vec2>>>>,
}

impl Flocking {
    pub fn new(config: &config::Config) -> Result<Self, ScenarioError> {
        let world = World::from_config(&config.simulation)?;
        let seed = random_seed(&config.simulation);
        let cfg = &config.flocking;

        let mut rng = rng_for(seed, 0);
        let population = Population::new();
        let mut crowd = Crowd::default();
        let mut proximities = Vec::with_capacity(cfg.count);

        for i in 0..cfg.count {
            let limiter = FullLimiter::new(
                cfg.max_speed,
                cfg.max_linear_acceleration,
                f32::INFINITY,
                cfg.max_angular_acceleration,
            );
            let agent = Agent::new(world.random_position(&mut rng), cfg.bounding_radius, limiter)
                .with_orientation(rng.gen_range(-PI, PI))
                .into_shared();
            population.push(&agent);

            let me = downgrade(&agent);
            let proximity = Rc::new(RefCell::new(FieldOfViewProximity::new(
                me.clone(),
                population.clone(),
                cfg.proximity_radius,
                cfg.proximity_angle_degrees.to_radians(),
            )));
            let shared: ProximityRef<Vec2> = proximity.clone();
            proximities.push(proximity);

            let accel = cfg.max_linear_acceleration;
            let group = WeightedBlender::new(me.clone(), accel, cfg.max_angular_acceleration)
                .with(
                    Alignment::new(me.clone(), shared.clone(), accel),
                    cfg.alignment_weight,
                )
                .with(
                    Cohesion::new(me.clone(), shared.clone(), accel),
                    cfg.cohesion_weight,
                )
                .with(Separation::new(me.clone(), shared, accel), cfg.separation_weight);

            // not facing independently, so no turning
            let wander = wander_from_config(me.clone(), &config.wander, rng_for(seed, i + 1))
                .with_max_angular_acceleration(0.0);

            let priority = PrioritySteering::new(me, cfg.priority_epsilon)
                .with(group)
                .with(wander);

            crowd.push(agent, Box::new(priority));
        }

        debug!("created flock"; "agents" => crowd.len(), "seed" => seed);
        Ok(Self {
            world,
            crowd,
            proximities,
        })
    }
}

impl Scenario for Flocking {
    fn name(&self) -> &'static str {
        "flocking"
    }

    fn tick(&mut self, dt: f32) {
        self.crowd.tick(&self.world, dt);
    }

    fn agents(&self) -> &[SharedAgent] {
        self.crowd.agents()
    }

    fn retune(&mut self, config: &config::Config) {
        let cfg = &config.flocking;
        for proximity in &self.proximities {
            let mut proximity = proximity.borrow_mut();
            proximity
                .set_radius(cfg.proximity_radius)
                .set_angle(cfg.proximity_angle_degrees.to_radians());
        }

        for agent in self.crowd.agents() {
            agent.borrow_mut().set_max_linear_speed(cfg.max_speed);
        }
    }
}
