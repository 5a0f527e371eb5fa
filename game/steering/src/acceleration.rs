use crate::vector::Vector;

/// Output of a behaviour for a single tick. Callers own one and pass it into every calculation, which
/// overwrites it entirely
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SteeringAcceleration<V> {
    pub linear: V,
    /// Signed rotational acceleration
    pub angular: f32,
}

impl<V: Vector> SteeringAcceleration<V> {
    pub fn new(linear: V, angular: f32) -> Self {
        Self { linear, angular }
    }

    pub fn zero() -> Self {
        Self::new(V::ZERO, 0.0)
    }

    pub fn set_zero(&mut self) -> &mut Self {
        self.linear = V::ZERO;
        self.angular = 0.0;
        self
    }

    pub fn is_zero(&self) -> bool {
        self.linear == V::ZERO && self.angular == 0.0
    }

    pub fn add(&mut self, other: &Self) -> &mut Self {
        self.linear += other.linear;
        self.angular += other.angular;
        self
    }

    /// `self += other * scale`, both components
    pub fn mul_add(&mut self, other: &Self, scale: f32) -> &mut Self {
        self.linear = self.linear.add_scaled(other.linear, scale);
        self.angular += other.angular * scale;
        self
    }

    pub fn scale(&mut self, scale: f32) -> &mut Self {
        self.linear = self.linear * scale;
        self.angular *= scale;
        self
    }

    /// `|linear|² + angular²`
    pub fn square_magnitude(&self) -> f32 {
        self.linear.length_squared() + self.angular * self.angular
    }

    pub fn magnitude(&self) -> f32 {
        self.square_magnitude().sqrt()
    }
}

impl<V: Vector> Default for SteeringAcceleration<V> {
    fn default() -> Self {
        Self::zero()
    }
}
