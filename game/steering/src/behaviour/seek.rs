use crate::acceleration::SteeringAcceleration;
use crate::behaviour::{behaviour_state, primitives, BehaviourState, SteeringBehaviour};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Full acceleration towards the target's current position
#[derive(Debug)]
pub struct Seek<V: Vector> {
    state: BehaviourState<V>,
    target: WeakSteerable<V>,
    max_linear_acceleration: f32,
}

/// Full acceleration directly away from the target
#[derive(Debug)]
pub struct Flee<V: Vector> {
    state: BehaviourState<V>,
    target: WeakSteerable<V>,
    max_linear_acceleration: f32,
}

impl<V: Vector> Seek<V> {
    pub fn new(
        owner: WeakSteerable<V>,
        target: WeakSteerable<V>,
        max_linear_acceleration: f32,
    ) -> Self {
        Self {
            state: BehaviourState::new(owner),
            target,
            max_linear_acceleration,
        }
    }

    pub fn target(&self) -> &WeakSteerable<V> {
        &self.target
    }

    pub fn set_target(&mut self, target: WeakSteerable<V>) {
        self.target = target;
    }
}

impl<V: Vector> Flee<V> {
    pub fn new(
        owner: WeakSteerable<V>,
        target: WeakSteerable<V>,
        max_linear_acceleration: f32,
    ) -> Self {
        Self {
            state: BehaviourState::new(owner),
            target,
            max_linear_acceleration,
        }
    }

    pub fn target(&self) -> &WeakSteerable<V> {
        &self.target
    }

    pub fn set_target(&mut self, target: WeakSteerable<V>) {
        self.target = target;
    }
}

tunables! {
    impl [V: Vector] Seek<V> {
        max_linear_acceleration: f32,
    }
}

tunables! {
    impl [V: Vector] Flee<V> {
        max_linear_acceleration: f32,
    }
}

impl<V: Vector> SteeringBehaviour<V> for Seek<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let target = upgrade_or_zero!(self.target, steering, "target");
        let target = target.borrow().position();
        primitives::seek(owner, target, self.max_linear_acceleration, steering);
    }
}

impl<V: Vector> SteeringBehaviour<V> for Flee<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let target = upgrade_or_zero!(self.target, steering, "target");
        let target = target.borrow().position();
        primitives::seek(owner, target, -self.max_linear_acceleration, steering);
    }
}
