use crate::acceleration::SteeringAcceleration;
use crate::behaviour::{behaviour_state, BehaviourState, SteeringBehaviour};
use crate::proximity::ProximityRef;
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Steers away from the neighbour that will come closest soonest, if their paths would overlap
pub struct CollisionAvoidance<V: Vector> {
    state: BehaviourState<V>,
    proximity: ProximityRef<V>,
    max_linear_acceleration: f32,
}

/// Closest approach with a single neighbour
struct Approach<V> {
    time: f32,
    min_separation: f32,
    distance: f32,
    radii: f32,
    relative_position: V,
    relative_velocity: V,
}

impl<V: Vector> CollisionAvoidance<V> {
    pub fn new(
        owner: WeakSteerable<V>,
        proximity: ProximityRef<V>,
        max_linear_acceleration: f32,
    ) -> Self {
        Self {
            state: BehaviourState::new(owner),
            proximity,
            max_linear_acceleration,
        }
    }

    pub fn proximity(&self) -> &ProximityRef<V> {
        &self.proximity
    }

    pub fn set_proximity(&mut self, proximity: ProximityRef<V>) {
        self.proximity = proximity;
    }
}

tunables! {
    impl [V: Vector] CollisionAvoidance<V> {
        max_linear_acceleration: f32,
    }
}

/// None if the pair is not closing in or will pass with room to spare
fn closest_approach<V: Vector>(
    owner: &dyn Steerable<V>,
    neighbour: &dyn Steerable<V>,
    soonest: f32,
) -> Option<Approach<V>> {
    let relative_position = neighbour.position() - owner.position();
    let relative_velocity = neighbour.linear_velocity() - owner.linear_velocity();
    let relative_speed_squared = relative_velocity.length_squared();
    if relative_speed_squared == 0.0 {
        return None;
    }

    let time = -relative_position.dot(relative_velocity) / relative_speed_squared;
    if time <= 0.0 || time >= soonest {
        return None;
    }

    let distance = relative_position.length();
    let min_separation = distance - relative_speed_squared.sqrt() * time;
    let radii = owner.bounding_radius() + neighbour.bounding_radius();
    if min_separation > radii {
        return None;
    }

    Some(Approach {
        time,
        min_separation,
        distance,
        radii,
        relative_position,
        relative_velocity,
    })
}

impl<V: Vector> SteeringBehaviour<V> for CollisionAvoidance<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let mut first: Option<Approach<V>> = None;
        self.proximity.borrow().find_neighbours(&mut |neighbour| {
            let soonest = first.as_ref().map(|a| a.time).unwrap_or(f32::INFINITY);
            match closest_approach(owner, neighbour, soonest) {
                Some(approach) => {
                    first = Some(approach);
                    true
                }
                None => false,
            }
        });

        let first = match first {
            Some(approach) => approach,
            None => {
                steering.set_zero();
                return;
            }
        };

        // already touching or will collide head on, so steer away from where it is now
        let relative_position = if first.min_separation <= 0.0 || first.distance < first.radii {
            first.relative_position
        } else {
            first
                .relative_position
                .add_scaled(first.relative_velocity, first.time)
        };

        steering.linear = relative_position.normalize_or_zero() * -self.max_linear_acceleration;
        steering.angular = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use common::*;

    use super::*;
    use crate::agent::Agent;
    use crate::limiter::FullLimiter;
    use crate::proximity::{InfiniteProximity, Population};
    use crate::steerable::downgrade;

    fn avoidance(owner: &Rc<RefCell<Agent<Vec2>>>, population: &Population<Vec2>) -> CollisionAvoidance<Vec2> {
        let proximity = Rc::new(RefCell::new(InfiniteProximity::new(
            downgrade(owner),
            population.clone(),
        )));
        CollisionAvoidance::new(downgrade(owner), proximity, 4.0)
    }

    #[test]
    fn sidesteps_oncoming_neighbour() {
        let population = Population::new();
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default())
            .with_velocity(vec2(0.0, 10.0))
            .into_shared();
        let oncoming = Agent::new(vec2(1.0, 50.0), 1.0, FullLimiter::default())
            .with_velocity(vec2(0.0, -10.0))
            .into_shared();
        population.push(&owner);
        population.push(&oncoming);

        let mut steering = SteeringAcceleration::zero();
        avoidance(&owner, &population).calculate_steering(&mut steering);
        assert!(steering.linear.abs_diff_eq(vec2(-4.0, 0.0), 1e-4));
        assert_eq!(steering.angular, 0.0);
    }

    #[test]
    fn soonest_collision_wins() {
        let population = Population::new();
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default())
            .with_velocity(vec2(0.0, 10.0))
            .into_shared();
        let later = Agent::new(vec2(-1.0, 100.0), 1.0, FullLimiter::default()).into_shared();
        let sooner = Agent::new(vec2(1.0, 30.0), 1.0, FullLimiter::default()).into_shared();
        population.push(&owner);
        population.push(&later);
        population.push(&sooner);

        let mut steering = SteeringAcceleration::zero();
        avoidance(&owner, &population).calculate_steering(&mut steering);
        assert!(steering.linear.x < 0.0);
    }

    #[test]
    fn diverging_neighbour_is_ignored() {
        let population = Population::new();
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default())
            .with_velocity(vec2(0.0, -10.0))
            .into_shared();
        let ahead = Agent::new(vec2(0.0, 10.0), 1.0, FullLimiter::default())
            .with_velocity(vec2(0.0, 10.0))
            .into_shared();
        population.push(&owner);
        population.push(&ahead);

        let mut steering = SteeringAcceleration::new(Vec2::ONE, 1.0);
        avoidance(&owner, &population).calculate_steering(&mut steering);
        assert!(steering.is_zero());
    }
}
