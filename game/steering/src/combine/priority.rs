use common::*;

use crate::acceleration::SteeringAcceleration;
use crate::behaviour::{behaviour_state, BehaviourState, BoxedBehaviour, SteeringBehaviour};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Returns the output of the first enabled child that produces a non-negligible acceleration.
/// Later children are not evaluated at all
pub struct PrioritySteering<V: Vector> {
    state: BehaviourState<V>,
    behaviours: Vec<BoxedBehaviour<V>>,
    /// Outputs with a magnitude at or below this are negligible
    epsilon: f32,
    /// Child chosen by the last calculation, None if every child was negligible
    selected_behaviour_index: Option<usize>,
}

impl<V: Vector> PrioritySteering<V> {
    pub fn new(owner: WeakSteerable<V>, epsilon: f32) -> Self {
        Self {
            state: BehaviourState::new(owner),
            behaviours: Vec::new(),
            epsilon,
            selected_behaviour_index: None,
        }
    }

    /// The behaviour is steered on behalf of this owner from now on
    pub fn add(&mut self, mut behaviour: BoxedBehaviour<V>) -> &mut Self {
        behaviour.set_owner(self.owner().clone());
        self.behaviours.push(behaviour);
        self
    }

    pub fn with(mut self, behaviour: impl SteeringBehaviour<V> + 'static) -> Self {
        self.add(Box::new(behaviour));
        self
    }

    pub fn get(&self, index: usize) -> Option<&dyn SteeringBehaviour<V>> {
        self.behaviours.get(index).map(|b| &**b)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn SteeringBehaviour<V> + 'static)> {
        self.behaviours.get_mut(index).map(|b| &mut **b)
    }

    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }

    pub fn selected_behaviour_index(&self) -> Option<usize> {
        self.selected_behaviour_index
    }
}

tunables! {
    impl [V: Vector] PrioritySteering<V> {
        epsilon: f32,
    }
}

impl<V: Vector> SteeringBehaviour<V> for PrioritySteering<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        _: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let threshold = self.epsilon * self.epsilon;
        steering.set_zero();

        // the last enabled child's output is left in place if none are significant
        self.selected_behaviour_index = self
            .behaviours
            .iter_mut()
            .enumerate()
            .filter(|(_, b)| b.is_enabled())
            .find_map(|(i, behaviour)| {
                let magnitude = behaviour.calculate_steering(steering).square_magnitude();
                if magnitude > threshold {
                    Some(i)
                } else {
                    None
                }
            });
    }
}

impl<V: Vector> Debug for PrioritySteering<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PrioritySteering")
            .field("state", &self.state)
            .field("behaviours", &self.behaviours.len())
            .field("epsilon", &self.epsilon)
            .field("selected", &self.selected_behaviour_index)
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
    fn first_significant_wins() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let me = downgrade(&owner);

        let strong = Fixed::new(me.clone(), vec2(3.0, 4.0), 0.5);
        let weak = Fixed::new(me.clone(), vec2(1e-5, 0.0), 0.0);
        let weak_calls = weak.calls.clone();
        let mut priority = PrioritySteering::new(me.clone(), 0.001).with(strong).with(weak);

        let mut steering = SteeringAcceleration::zero();
        priority.calculate_steering(&mut steering);
        assert_eq!(steering, SteeringAcceleration::new(vec2(3.0, 4.0), 0.5));
        assert_eq!(priority.selected_behaviour_index(), Some(0));
        assert_eq!(weak_calls.get(), 0);
    }

    #[test]
    fn negligible_first_falls_through() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let me = downgrade(&owner);

        let mut priority = PrioritySteering::new(me.clone(), 0.001)
            .with(Fixed::new(me.clone(), vec2(1e-5, 0.0), 0.0))
            .with(Fixed::new(me.clone(), vec2(3.0, 4.0), 0.5));

        let mut steering = SteeringAcceleration::zero();
        priority.calculate_steering(&mut steering);
        assert_eq!(steering, SteeringAcceleration::new(vec2(3.0, 4.0), 0.5));
        assert_eq!(priority.selected_behaviour_index(), Some(1));
    }

    #[test]
    fn all_negligible_returns_last() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let me = downgrade(&owner);

        let mut priority = PrioritySteering::new(me.clone(), 0.001)
            .with(Fixed::new(me.clone(), vec2(1e-5, 0.0), 0.0))
            .with(Fixed::new(me.clone(), vec2(0.0, 2e-4), 0.0));

        let mut steering = SteeringAcceleration::zero();
        priority.calculate_steering(&mut steering);
        assert_eq!(steering.linear, vec2(0.0, 2e-4));
        assert_eq!(priority.selected_behaviour_index(), None);
    }

    #[test]
    fn all_disabled_is_zero() {
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let me = downgrade(&owner);

        let mut priority = PrioritySteering::new(me.clone(), 0.001)
            .with(Fixed::new(me.clone(), vec2(5.0, 0.0), 0.0).disabled())
            .with(Fixed::new(me.clone(), vec2(0.0, 5.0), 1.0).disabled());

        let mut steering = SteeringAcceleration::new(Vec2::ONE, 1.0);
        priority.calculate_steering(&mut steering);
        assert!(steering.is_zero());
        assert_eq!(priority.selected_behaviour_index(), None);
    }
}
