use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use common::*;
use steering::path::PathError;
use steering::{Agent, BoxedBehaviour, Steerable, SteeringAcceleration};

pub type SharedAgent = Rc<RefCell<Agent<Vec2>>>;

static TICK: AtomicU64 = AtomicU64::new(0);

/// Ticks run so far, used to timestamp logs
pub fn current_tick() -> u64 {
    TICK.load(Ordering::Relaxed)
}

pub fn next_tick() -> u64 {
    TICK.fetch_add(1, Ordering::Relaxed) + 1
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("World must have a positive size, not {0}x{1}")]
    BadWorldSize(f32, f32),

    #[error("Invalid path: {0}")]
    Path(#[from] PathError),
}

pub trait Scenario {
    fn name(&self) -> &'static str;

    /// Calculates steering for every agent, then moves them all
    fn tick(&mut self, dt: f32);

    /// Agents steered by this scenario
    fn agents(&self) -> &[SharedAgent];

    /// Stationary agents that others react to
    fn obstacles(&self) -> &[SharedAgent] {
        &[]
    }

    /// Applies live changes to tuning parameters
    fn retune(&mut self, _config: &config::Config) {}
}

/// Toroidal world, agents leaving one side reappear on the other
#[derive(Debug, Copy, Clone)]
pub struct World {
    size: Vec2,
}

impl World {
    pub fn new(width: f32, height: f32) -> Result<Self, ScenarioError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ScenarioError::BadWorldSize(width, height));
        }

        Ok(Self {
            size: vec2(width, height),
        })
    }

    pub fn from_config(config: &config::Simulation) -> Result<Self, ScenarioError> {
        let (w, h) = config.world_size;
        Self::new(w, h)
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn centre(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        vec2(pos.x.rem_euclid(self.size.x), pos.y.rem_euclid(self.size.y))
    }

    pub fn random_position(&self, rng: &mut impl Rng) -> Vec2 {
        vec2(rng.gen_range(0.0, self.size.x), rng.gen_range(0.0, self.size.y))
    }

    /// Integrates the steering and wraps the agent back into the world
    pub fn apply(&self, agent: &SharedAgent, steering: &SteeringAcceleration<Vec2>, dt: f32) {
        let mut agent = agent.borrow_mut();
        agent.apply_steering(steering, dt);

        let pos = self.wrap(agent.position());
        agent.set_position(pos);
    }
}

/// Agents and their top level behaviours
#[derive(Default)]
pub struct Crowd {
    agents: Vec<SharedAgent>,
    behaviours: Vec<BoxedBehaviour<Vec2>>,
    steering: Vec<SteeringAcceleration<Vec2>>,
}

impl Crowd {
    pub fn push(&mut self, agent: SharedAgent, behaviour: BoxedBehaviour<Vec2>) {
        self.agents.push(agent);
        self.behaviours.push(behaviour);
        self.steering.push(SteeringAcceleration::zero());
    }

    pub fn agents(&self) -> &[SharedAgent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Steering of the last tick
    pub fn steering(&self) -> &[SteeringAcceleration<Vec2>] {
        &self.steering
    }

    /// Nobody moves until everyone's steering has been calculated
    pub fn tick(&mut self, world: &World, dt: f32) {
        for (behaviour, steering) in self.behaviours.iter_mut().zip(self.steering.iter_mut()) {
            behaviour.calculate_steering(steering);
        }

        for (agent, steering) in self.agents.iter().zip(self.steering.iter()) {
            world.apply(agent, steering, dt);
        }
    }
}
