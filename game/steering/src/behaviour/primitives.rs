//! Building blocks shared by the concrete behaviours. Each one overwrites the whole output

use crate::acceleration::SteeringAcceleration;
use crate::steerable::Steerable;
use crate::vector::{wrap_angle_around_zero, Vector};

/// Tuning for approaching a point and stopping on it
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArriveParams {
    pub max_linear_acceleration: f32,
    pub max_speed: f32,
    /// Close enough to count as arrived
    pub arrival_tolerance: f32,
    /// Start slowing down inside this radius
    pub deceleration_radius: f32,
    /// Time over which to reach the target velocity
    pub time_to_target: f32,
}

/// Tuning for turning to face an orientation and stopping on it
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AlignParams {
    pub max_angular_acceleration: f32,
    /// Maximum rotation speed
    pub max_rotation: f32,
    /// Close enough to count as aligned, radians
    pub align_tolerance: f32,
    /// Start slowing the rotation inside this many radians
    pub deceleration_radius: f32,
    pub time_to_target: f32,
}

impl Default for ArriveParams {
    fn default() -> Self {
        Self {
            max_linear_acceleration: 100.0,
            max_speed: 100.0,
            arrival_tolerance: 0.001,
            deceleration_radius: 10.0,
            time_to_target: 0.1,
        }
    }
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            max_angular_acceleration: 10.0,
            max_rotation: 5.0,
            align_tolerance: 0.001,
            deceleration_radius: 0.5,
            time_to_target: 0.1,
        }
    }
}

/// Full acceleration straight towards `target`, zero if already there
pub fn seek<V: Vector>(
    owner: &dyn Steerable<V>,
    target: V,
    max_linear_acceleration: f32,
    steering: &mut SteeringAcceleration<V>,
) {
    steering.linear = (target - owner.position()).normalize_or_zero() * max_linear_acceleration;
    steering.angular = 0.0;
}

/// Like [seek] but slows down to stop on the target
pub fn arrive<V: Vector>(
    owner: &dyn Steerable<V>,
    target: V,
    params: &ArriveParams,
    steering: &mut SteeringAcceleration<V>,
) {
    let to_target = target - owner.position();
    let distance = to_target.length();

    if distance <= params.arrival_tolerance {
        steering.set_zero();
        return;
    }

    let mut target_speed = params.max_speed;
    if distance <= params.deceleration_radius {
        target_speed *= distance / params.deceleration_radius;
    }

    let target_velocity = to_target * (target_speed / distance);
    steering.linear = ((target_velocity - owner.linear_velocity()) * params.time_to_target.recip())
        .limit(params.max_linear_acceleration);
    steering.angular = 0.0;
}

/// Angular acceleration to turn towards `target_orientation` the short way round
pub fn reach_orientation<V: Vector>(
    owner: &dyn Steerable<V>,
    target_orientation: f32,
    params: &AlignParams,
    steering: &mut SteeringAcceleration<V>,
) {
    let rotation = wrap_angle_around_zero(target_orientation - owner.orientation());
    let rotation_size = rotation.abs();

    if rotation_size <= params.align_tolerance {
        steering.set_zero();
        return;
    }

    let mut target_rotation = params.max_rotation;
    if rotation_size <= params.deceleration_radius {
        target_rotation *= rotation_size / params.deceleration_radius;
    }

    // carry the direction of the rotation
    target_rotation *= rotation / rotation_size;

    let angular = (target_rotation - owner.angular_velocity()) / params.time_to_target;
    let max = params.max_angular_acceleration;

    steering.linear = V::ZERO;
    steering.angular = angular.clamp(-max, max);
}

/// Turns to look at `target`, zero if already there
pub fn face<V: Vector>(
    owner: &dyn Steerable<V>,
    target: V,
    params: &AlignParams,
    steering: &mut SteeringAcceleration<V>,
) {
    let to_target = target - owner.position();
    if to_target.is_zero(f32::EPSILON) {
        steering.set_zero();
        return;
    }

    reach_orientation(owner, to_target.to_orientation(), params, steering);
}
