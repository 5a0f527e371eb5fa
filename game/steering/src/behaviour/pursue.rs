use crate::acceleration::SteeringAcceleration;
use crate::behaviour::{behaviour_state, primitives, BehaviourState, SteeringBehaviour};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Seeks where the target will be, assuming it keeps its current velocity
#[derive(Debug)]
pub struct Pursue<V: Vector> {
    state: BehaviourState<V>,
    target: WeakSteerable<V>,
    max_linear_acceleration: f32,
    /// Upper bound on how far ahead to predict, seconds
    max_prediction_time: f32,
}

/// Flees from where the target will be
#[derive(Debug)]
pub struct Evade<V: Vector>(Pursue<V>);

impl<V: Vector> Pursue<V> {
    pub fn new(owner: WeakSteerable<V>, target: WeakSteerable<V>, max_linear_acceleration: f32) -> Self {
        Self {
            state: BehaviourState::new(owner),
            target,
            max_linear_acceleration,
            max_prediction_time: 1.0,
        }
    }

    pub fn target(&self) -> &WeakSteerable<V> {
        &self.target
    }

    pub fn set_target(&mut self, target: WeakSteerable<V>) {
        self.target = target;
    }

    fn steer(
        &self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
        max_linear_acceleration: f32,
    ) {
        let target = upgrade_or_zero!(self.target, steering, "target");
        let target = target.borrow();
        let predicted = predict_position(owner, &*target, self.max_prediction_time);
        primitives::seek(owner, predicted, max_linear_acceleration, steering);
    }
}

impl<V: Vector> Evade<V> {
    pub fn new(owner: WeakSteerable<V>, target: WeakSteerable<V>, max_linear_acceleration: f32) -> Self {
        Self(Pursue::new(owner, target, max_linear_acceleration))
    }

    pub fn target(&self) -> &WeakSteerable<V> {
        self.0.target()
    }

    pub fn set_target(&mut self, target: WeakSteerable<V>) {
        self.0.set_target(target)
    }

    pub fn max_linear_acceleration(&self) -> f32 {
        self.0.max_linear_acceleration()
    }

    pub fn set_max_linear_acceleration(&mut self, max: f32) -> &mut Self {
        self.0.set_max_linear_acceleration(max);
        self
    }

    pub fn max_prediction_time(&self) -> f32 {
        self.0.max_prediction_time()
    }

    pub fn set_max_prediction_time(&mut self, time: f32) -> &mut Self {
        self.0.set_max_prediction_time(time);
        self
    }

    pub fn with_max_prediction_time(self, time: f32) -> Self {
        Self(self.0.with_max_prediction_time(time))
    }
}

tunables! {
    impl [V: Vector] Pursue<V> {
        max_linear_acceleration: f32,
        max_prediction_time: f32,
    }
}

/// Target position extrapolated by the time it would take the owner to cover the distance at its
/// current speed, capped at `max_prediction_time`
fn predict_position<V: Vector>(
    owner: &dyn Steerable<V>,
    target: &dyn Steerable<V>,
    max_prediction_time: f32,
) -> V {
    let target_position = target.position();
    let distance2 = target_position.distance_squared(owner.position());
    let speed2 = owner.linear_velocity().length_squared();

    let mut prediction_time = max_prediction_time;
    if speed2 > 0.0 {
        let prediction_time2 = distance2 / speed2;
        if prediction_time2 < max_prediction_time * max_prediction_time {
            prediction_time = prediction_time2.sqrt();
        }
    }

    target_position.add_scaled(target.linear_velocity(), prediction_time)
}

impl<V: Vector> SteeringBehaviour<V> for Pursue<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        self.steer(owner, steering, self.max_linear_acceleration);
    }
}

impl<V: Vector> SteeringBehaviour<V> for Evade<V> {
    fn state(&self) -> &BehaviourState<V> {
        &self.0.state
    }

    fn state_mut(&mut self) -> &mut BehaviourState<V> {
        &mut self.0.state
    }

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        self.0.steer(owner, steering, -self.0.max_linear_acceleration);
    }
}

#[cfg(test)]
mod tests {
    use common::*;

    use super::*;
    use crate::agent::Agent;
    use crate::limiter::FullLimiter;
    use crate::steerable::downgrade;

    #[test]
    fn leads_moving_target() {
        // owner moving at 10/s, target 20 away moving sideways at 5/s
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default())
            .with_velocity(vec2(0.0, 10.0))
            .into_shared();
        let target = Agent::new(vec2(0.0, 20.0), 1.0, FullLimiter::default())
            .with_velocity(vec2(5.0, 0.0))
            .into_shared();

        let mut pursue =
            Pursue::new(downgrade(&owner), downgrade(&target), 1.0).with_max_prediction_time(10.0);
        let mut steering = SteeringAcceleration::zero();
        pursue.calculate_steering(&mut steering);

        // 2 seconds to cover 20 units, so aims at (10, 20)
        let expected = vec2(10.0, 20.0).normalize();
        assert!(steering.linear.abs_diff_eq(expected, 1e-5));

        // prediction is capped
        pursue.set_max_prediction_time(1.0);
        pursue.calculate_steering(&mut steering);
        let expected = vec2(5.0, 20.0).normalize();
        assert!(steering.linear.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn stationary_owner_uses_max_prediction() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let target = Agent::new(vec2(0.0, 10.0), 1.0, FullLimiter::default())
            .with_velocity(vec2(10.0, 0.0))
            .into_shared();

        let mut evade = Evade::new(downgrade(&owner), downgrade(&target), 2.0)
            .with_max_prediction_time(1.0);
        let mut steering = SteeringAcceleration::zero();
        evade.calculate_steering(&mut steering);

        // flees (10, 10)
        let expected = vec2(-1.0, -1.0).normalize() * 2.0;
        assert!(steering.linear.abs_diff_eq(expected, 1e-5));
    }
}
