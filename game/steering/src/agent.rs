use std::cell::RefCell;
use std::rc::Rc;

use crate::acceleration::SteeringAcceleration;
use crate::limiter::{FullLimiter, Limiter};
use crate::steerable::Steerable;
use crate::vector::{wrap_angle_around_zero, Vector};

/// Simple kinematic body that integrates the steering it is given
#[derive(Debug, Clone)]
pub struct Agent<V> {
    position: V,
    orientation: f32,
    linear_velocity: V,
    angular_velocity: f32,
    bounding_radius: f32,
    limiter: FullLimiter,

    /// If false, orientation follows the direction of travel and angular steering is ignored
    independent_facing: bool,
}

impl<V: Vector> Agent<V> {
    pub fn new(position: V, bounding_radius: f32, limiter: FullLimiter) -> Self {
        Self {
            position,
            orientation: 0.0,
            linear_velocity: V::ZERO,
            angular_velocity: 0.0,
            bounding_radius,
            limiter,
            independent_facing: false,
        }
    }

    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_velocity(mut self, velocity: V) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_independent_facing(mut self, independent: bool) -> Self {
        self.independent_facing = independent;
        self
    }

    /// Wraps in the shared handle behaviours and proximities expect
    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    pub fn set_position(&mut self, position: V) {
        self.position = position;
    }

    pub fn set_orientation(&mut self, orientation: f32) {
        self.orientation = orientation;
    }

    pub fn set_linear_velocity(&mut self, velocity: V) {
        self.linear_velocity = velocity;
    }

    pub fn independent_facing(&self) -> bool {
        self.independent_facing
    }

    pub fn set_independent_facing(&mut self, independent: bool) {
        self.independent_facing = independent;
    }

    pub fn limiter(&self) -> &FullLimiter {
        &self.limiter
    }

    /// Explicit euler step: moves with the velocity from before this steering is added.
    /// Velocities are capped by the limiter
    pub fn apply_steering(&mut self, steering: &SteeringAcceleration<V>, dt: f32) {
        self.position += self.linear_velocity * dt;
        self.linear_velocity = self
            .linear_velocity
            .add_scaled(steering.linear, dt)
            .limit(self.limiter.max_linear_speed());

        if self.independent_facing {
            self.orientation = wrap_angle_around_zero(self.orientation + self.angular_velocity * dt);
            let max = self.limiter.max_angular_speed();
            self.angular_velocity = (self.angular_velocity + steering.angular * dt).clamp(-max, max);
        } else {
            let threshold = self.limiter.zero_linear_speed_threshold();
            if !self.linear_velocity.is_zero(threshold) {
                self.orientation = self.linear_velocity.to_orientation();
            }
            self.angular_velocity = 0.0;
        }
    }
}

impl<V: Vector> Steerable<V> for Agent<V> {
    fn position(&self) -> V {
        self.position
    }

    fn orientation(&self) -> f32 {
        self.orientation
    }

    fn linear_velocity(&self) -> V {
        self.linear_velocity
    }

    fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }
}

impl<V> Limiter for Agent<V> {
    fn max_linear_speed(&self) -> f32 {
        self.limiter.max_linear_speed()
    }

    fn set_max_linear_speed(&mut self, max: f32) {
        self.limiter.set_max_linear_speed(max)
    }

    fn max_linear_acceleration(&self) -> f32 {
        self.limiter.max_linear_acceleration()
    }

    fn set_max_linear_acceleration(&mut self, max: f32) {
        self.limiter.set_max_linear_acceleration(max)
    }

    fn max_angular_speed(&self) -> f32 {
        self.limiter.max_angular_speed()
    }

    fn set_max_angular_speed(&mut self, max: f32) {
        self.limiter.set_max_angular_speed(max)
    }

    fn max_angular_acceleration(&self) -> f32 {
        self.limiter.max_angular_acceleration()
    }

    fn set_max_angular_acceleration(&mut self, max: f32) {
        self.limiter.set_max_angular_acceleration(max)
    }

    fn zero_linear_speed_threshold(&self) -> f32 {
        self.limiter.zero_linear_speed_threshold()
    }

    fn set_zero_linear_speed_threshold(&mut self, threshold: f32) {
        self.limiter.set_zero_linear_speed_threshold(threshold)
    }
}
