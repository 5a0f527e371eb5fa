use crate::acceleration::SteeringAcceleration;
use crate::behaviour::primitives::{self, AlignParams};
use crate::behaviour::{behaviour_state, BehaviourState, SteeringBehaviour};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Turns to match the target's orientation
#[derive(Debug)]
pub struct Align<V: Vector> {
    state: BehaviourState<V>,
    target: WeakSteerable<V>,
    align: AlignParams,
}

/// Turns to look at the target's position
#[derive(Debug)]
pub struct Face<V: Vector> {
    state: BehaviourState<V>,
    target: WeakSteerable<V>,
    align: AlignParams,
}

/// Turns to face the direction of travel
#[derive(Debug)]
pub struct LookWhereYouAreGoing<V: Vector> {
    state: BehaviourState<V>,
    align: AlignParams,
}

impl<V: Vector> Align<V> {
    pub fn new(owner: WeakSteerable<V>, target: WeakSteerable<V>) -> Self {
        Self {
            state: BehaviourState::new(owner),
            target,
            align: AlignParams::default(),
        }
    }

    pub fn set_target(&mut self, target: WeakSteerable<V>) {
        self.target = target;
    }
}

impl<V: Vector> Face<V> {
    pub fn new(owner: WeakSteerable<V>, target: WeakSteerable<V>) -> Self {
        Self {
            state: BehaviourState::new(owner),
            target,
            align: AlignParams::default(),
        }
    }

    pub fn set_target(&mut self, target: WeakSteerable<V>) {
        self.target = target;
    }
}

impl<V: Vector> LookWhereYouAreGoing<V> {
    pub fn new(owner: WeakSteerable<V>) -> Self {
        Self {
            state: BehaviourState::new(owner),
            align: AlignParams::default(),
        }
    }
}

macro_rules! align_tunables {
    ($ty:ident) => {
        tunables! {
            impl [V: Vector] $ty<V> {
                max_angular_acceleration via align: f32,
                max_rotation via align: f32,
                align_tolerance via align: f32,
                deceleration_radius via align: f32,
                time_to_target via align: f32,
            }
        }
    };
}

align_tunables!(Align);
align_tunables!(Face);
align_tunables!(LookWhereYouAreGoing);

impl<V: Vector> SteeringBehaviour<V> for Align<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let target = upgrade_or_zero!(self.target, steering, "target");
        let orientation = target.borrow().orientation();
        primitives::reach_orientation(owner, orientation, &self.align, steering);
    }
}

impl<V: Vector> SteeringBehaviour<V> for Face<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let target = upgrade_or_zero!(self.target, steering, "target");
        let position = target.borrow().position();
        primitives::face(owner, position, &self.align, steering);
    }
}

impl<V: Vector> SteeringBehaviour<V> for LookWhereYouAreGoing<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let velocity = owner.linear_velocity();
        if velocity.is_zero(owner.zero_linear_speed_threshold()) {
            steering.set_zero();
            return;
        }

        primitives::reach_orientation(owner, velocity.to_orientation(), &self.align, steering);
    }
}
