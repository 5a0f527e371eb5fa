//! Kinematic bounds, kept apart from the behaviours that produce accelerations

/// Maximum speeds and accelerations of an agent
pub trait Limiter {
    fn max_linear_speed(&self) -> f32;
    fn set_max_linear_speed(&mut self, max: f32);

    fn max_linear_acceleration(&self) -> f32;
    fn set_max_linear_acceleration(&mut self, max: f32);

    fn max_angular_speed(&self) -> f32;
    fn set_max_angular_speed(&mut self, max: f32);

    fn max_angular_acceleration(&self) -> f32;
    fn set_max_angular_acceleration(&mut self, max: f32);

    /// Speeds at or below this are treated as stationary
    fn zero_linear_speed_threshold(&self) -> f32 {
        0.001
    }
    fn set_zero_linear_speed_threshold(&mut self, _threshold: f32) {}
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FullLimiter {
    max_linear_speed: f32,
    max_linear_acceleration: f32,
    max_angular_speed: f32,
    max_angular_acceleration: f32,
    zero_linear_speed_threshold: f32,
}

/// Unbounded, setters are ignored
#[derive(Debug, Copy, Clone, Default)]
pub struct NullLimiter;

impl FullLimiter {
    pub fn new(
        max_linear_speed: f32,
        max_linear_acceleration: f32,
        max_angular_speed: f32,
        max_angular_acceleration: f32,
    ) -> Self {
        Self {
            max_linear_speed,
            max_linear_acceleration,
            max_angular_speed,
            max_angular_acceleration,
            zero_linear_speed_threshold: 0.001,
        }
    }

    /// Copies the current bounds of any other limiter
    pub fn from_limiter(other: &dyn Limiter) -> Self {
        Self {
            max_linear_speed: other.max_linear_speed(),
            max_linear_acceleration: other.max_linear_acceleration(),
            max_angular_speed: other.max_angular_speed(),
            max_angular_acceleration: other.max_angular_acceleration(),
            zero_linear_speed_threshold: other.zero_linear_speed_threshold(),
        }
    }
}

impl Default for FullLimiter {
    fn default() -> Self {
        Self::from_limiter(&NullLimiter)
    }
}

impl Limiter for FullLimiter {
    fn max_linear_speed(&self) -> f32 {
        self.max_linear_speed
    }

    fn set_max_linear_speed(&mut self, max: f32) {
        self.max_linear_speed = max;
    }

    fn max_linear_acceleration(&self) -> f32 {
        self.max_linear_acceleration
    }

    fn set_max_linear_acceleration(&mut self, max: f32) {
        self.max_linear_acceleration = max;
    }

    fn max_angular_speed(&self) -> f32 {
        self.max_angular_speed
    }

    fn set_max_angular_speed(&mut self, max: f32) {
        self.max_angular_speed = max;
    }

    fn max_angular_acceleration(&self) -> f32 {
        self.max_angular_acceleration
    }

    fn set_max_angular_acceleration(&mut self, max: f32) {
        self.max_angular_acceleration = max;
    }

    fn zero_linear_speed_threshold(&self) -> f32 {
        self.zero_linear_speed_threshold
    }

    fn set_zero_linear_speed_threshold(&mut self, threshold: f32) {
        self.zero_linear_speed_threshold = threshold;
    }
}

impl Limiter for NullLimiter {
    fn max_linear_speed(&self) -> f32 {
        f32::INFINITY
    }

    fn set_max_linear_speed(&mut self, _: f32) {}

    fn max_linear_acceleration(&self) -> f32 {
        f32::INFINITY
    }

    fn set_max_linear_acceleration(&mut self, _: f32) {}

    fn max_angular_speed(&self) -> f32 {
        f32::INFINITY
    }

    fn set_max_angular_speed(&mut self, _: f32) {}

    fn max_angular_acceleration(&self) -> f32 {
        f32::INFINITY
    }

    fn set_max_angular_acceleration(&mut self, _: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settable_independently() {
        let mut limiter = FullLimiter::new(10.0, 20.0, 3.0, 4.0);
        limiter.set_max_linear_acceleration(50.0);

        assert_eq!(limiter.max_linear_speed(), 10.0);
        assert_eq!(limiter.max_linear_acceleration(), 50.0);
        assert_eq!(limiter.max_angular_speed(), 3.0);
        assert_eq!(limiter.max_angular_acceleration(), 4.0);
    }

    #[test]
    fn null_is_unbounded() {
        let mut limiter = NullLimiter;
        limiter.set_max_linear_speed(1.0);
        assert!(limiter.max_linear_speed().is_infinite());

        let copied = FullLimiter::default();
        assert!(copied.max_angular_acceleration().is_infinite());
    }
}
