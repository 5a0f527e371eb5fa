use crate::acceleration::SteeringAcceleration;
use crate::behaviour::primitives::{self, ArriveParams};
use crate::behaviour::{behaviour_state, BehaviourState, SteeringBehaviour};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Seeks the target and slows down to stop on it
#[derive(Debug)]
pub struct Arrive<V: Vector> {
    state: BehaviourState<V>,
    target: WeakSteerable<V>,
    arrival: ArriveParams,
}

impl<V: Vector> Arrive<V> {
    pub fn new(owner: WeakSteerable<V>, target: WeakSteerable<V>) -> Self {
        Self {
            state: BehaviourState::new(owner),
            target,
            arrival: ArriveParams::default(),
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
    impl [V: Vector] Arrive<V> {
        max_linear_acceleration via arrival: f32,
        max_speed via arrival: f32,
        arrival_tolerance via arrival: f32,
        deceleration_radius via arrival: f32,
        time_to_target via arrival: f32,
    }
}

impl<V: Vector> SteeringBehaviour<V> for Arrive<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let target = upgrade_or_zero!(self.target, steering, "target");
        let target = target.borrow().position();
        primitives::arrive(owner, target, &self.arrival, steering);
    }
}
