use common::*;

use crate::acceleration::SteeringAcceleration;
use crate::behaviour::{behaviour_state, BehaviourState, BoxedBehaviour, SteeringBehaviour};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

pub struct BehaviourAndWeight<V: Vector> {
    behaviour: BoxedBehaviour<V>,
    weight: f32,
}

/// Sums the weighted output of every enabled child, then clamps the result to its own limits.
/// Weights are not normalised
pub struct WeightedBlender<V: Vector> {
    state: BehaviourState<V>,
    behaviours: Vec<BehaviourAndWeight<V>>,
    max_linear_acceleration: f32,
    max_angular_acceleration: f32,
    /// Reused for every child, each one overwrites it
    scratch: SteeringAcceleration<V>,
}

impl<V: Vector> BehaviourAndWeight<V> {
    pub fn behaviour(&self) -> &dyn SteeringBehaviour<V> {
        &*self.behaviour
    }

    pub fn behaviour_mut(&mut self) -> &mut dyn SteeringBehaviour<V> {
        &mut *self.behaviour
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }
}

impl<V: Vector> WeightedBlender<V> {
    pub fn new(
        owner: WeakSteerable<V>,
        max_linear_acceleration: f32,
        max_angular_acceleration: f32,
    ) -> Self {
        Self {
            state: BehaviourState::new(owner),
            behaviours: Vec::new(),
            max_linear_acceleration,
            max_angular_acceleration,
            scratch: SteeringAcceleration::zero(),
        }
    }

    /// The behaviour is steered on behalf of this blender's owner from now on
    pub fn add(&mut self, mut behaviour: BoxedBehaviour<V>, weight: f32) -> &mut Self {
        behaviour.set_owner(self.owner().clone());
        self.behaviours.push(BehaviourAndWeight { behaviour, weight });
        self
    }

    pub fn with(mut self, behaviour: impl SteeringBehaviour<V> + 'static, weight: f32) -> Self {
        self.add(Box::new(behaviour), weight);
        self
    }

    pub fn get(&self, index: usize) -> Option<&BehaviourAndWeight<V>> {
        self.behaviours.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BehaviourAndWeight<V>> {
        self.behaviours.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> BehaviourAndWeight<V> {
        self.behaviours.remove(index)
    }

    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }
}

tunables! {
    impl [V: Vector] WeightedBlender<V> {
        max_linear_acceleration: f32,
        max_angular_acceleration: f32,
    }
}

impl<V: Vector> SteeringBehaviour<V> for WeightedBlender<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        _: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        steering.set_zero();

        for child in self.behaviours.iter_mut().filter(|b| b.behaviour.is_enabled()) {
            child.behaviour.calculate_steering(&mut self.scratch);
            steering.mul_add(&self.scratch, child.weight);
        }

        let max_angular = self.max_angular_acceleration;
        steering.linear = steering.linear.limit(self.max_linear_acceleration);
        steering.angular = steering.angular.clamp(-max_angular, max_angular);
    }
}

impl<V: Vector> Debug for WeightedBlender<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("WeightedBlender")
            .field("state", &self.state)
            .field(
                "weights",
                &self.behaviours.iter().map(|b| b.weight).collect_vec(),
            )
            .field("max_linear_acceleration", &self.max_linear_acceleration)
            .field("max_angular_acceleration", &self.max_angular_acceleration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crate::combine::testing::Fixed;
    use crate::limiter::FullLimiter;
    use crate::steerable::downgrade;

    #[test]
    fn weighted_sum_within_limits() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let me = downgrade(&owner);

        let mut blender = WeightedBlender::new(me.clone(), 100.0, 10.0)
            .with(Fixed::new(me.clone(), vec2(1.0, 0.0), 1.0), 2.0)
            .with(Fixed::new(me.clone(), vec2(0.0, 1.0), -0.5), 4.0);

        let mut steering = SteeringAcceleration::new(vec2(99.0, 99.0), 99.0);
        blender.calculate_steering(&mut steering);
        assert!(steering.linear.abs_diff_eq(vec2(2.0, 4.0), 1e-5));
        assert!(steering.angular.approx_eq(0.0, (f32::EPSILON, 2)));
    }

    #[test]
    fn extreme_output_is_clamped() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let me = downgrade(&owner);

        for &(linear, angular, weight) in [
            (vec2(1e6, -1e6), 1e5, 1e3),
            (vec2(-3.0, 4.0), -50.0, 7.0),
            (vec2(0.0, 1e9), 1e9, 1e9),
        ]
        .iter()
        {
            let mut blender = WeightedBlender::new(me.clone(), 5.0, 2.0)
                .with(Fixed::new(me.clone(), linear, angular), weight)
                .with(Fixed::new(me.clone(), linear, angular), weight);

            let mut steering = SteeringAcceleration::zero();
            blender.calculate_steering(&mut steering);
            assert!(steering.linear.length() <= 5.0 + 1e-4);
            assert!(steering.angular.abs() <= 2.0);
            assert!(steering.linear.length().approx_eq(5.0, (1e-4, 4)));
        }
    }

    #[test]
    fn clamped_in_3d() {
        let owner = Agent::new(Vec3::ZERO, 1.0, FullLimiter::default()).into_shared();
        let me = downgrade(&owner);

        let mut blender = WeightedBlender::new(me.clone(), 5.0, 2.0)
            .with(Fixed::new(me.clone(), vec3(0.0, 30.0, 40.0), -9.0), 1.0)
            .with(Fixed::new(me.clone(), vec3(0.0, 0.0, 1.0), 0.0), 0.0);

        let mut steering = SteeringAcceleration::zero();
        blender.calculate_steering(&mut steering);
        assert!(steering.linear.abs_diff_eq(vec3(0.0, 3.0, 4.0), 1e-5));
        assert_eq!(steering.angular, -2.0);
    }

    #[test]
    fn disabled_child_is_skipped() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let me = downgrade(&owner);

        let skipped = Fixed::new(me.clone(), vec2(10.0, 0.0), 0.0).disabled();
        let calls = skipped.calls.clone();
        let mut blender = WeightedBlender::new(me.clone(), 100.0, 100.0)
            .with(skipped, 1000.0)
            .with(Fixed::new(me.clone(), vec2(0.0, 1.0), 0.0), 1.0);

        let mut steering = SteeringAcceleration::zero();
        blender.calculate_steering(&mut steering);
        assert_eq!(steering.linear, vec2(0.0, 1.0));
        assert_eq!(calls.get(), 0);

        // takes effect on the next tick
        blender
            .get_mut(0)
            .expect("two behaviours")
            .behaviour_mut()
            .set_enabled(true);
        blender.calculate_steering(&mut steering);
        assert!(steering.linear.abs_diff_eq(vec2(10000.0, 1.0).normalize() * 100.0, 1e-3));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn children_are_reowned() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let other = Agent::new(Vec2::ONE, 1.0, FullLimiter::default()).into_shared();

        let blender = WeightedBlender::new(downgrade(&owner), 1.0, 1.0)
            .with(Fixed::new(downgrade(&other), Vec2::ZERO, 0.0), 1.0);

        let child_owner = blender.get(0).expect("one behaviour").behaviour().owner().clone();
        assert!(child_owner.ptr_eq(blender.owner()));
    }
}
