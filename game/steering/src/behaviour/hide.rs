use crate::acceleration::SteeringAcceleration;
use crate::behaviour::primitives::{self, ArriveParams};
use crate::behaviour::{behaviour_state, BehaviourState, SteeringBehaviour};
use crate::proximity::ProximityRef;
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Arrives at the closest spot behind an obstacle, as seen from the target. Obstacles are the
/// neighbours reported by the proximity
pub struct Hide<V: Vector> {
    state: BehaviourState<V>,
    target: WeakSteerable<V>,
    proximity: ProximityRef<V>,
    /// Gap between an obstacle's bounding radius and the hiding spot
    distance_from_boundary: f32,
    arrival: ArriveParams,
}

impl<V: Vector> Hide<V> {
    pub fn new(owner: WeakSteerable<V>, target: WeakSteerable<V>, proximity: ProximityRef<V>) -> Self {
        Self {
            state: BehaviourState::new(owner),
            target,
            proximity,
            distance_from_boundary: 0.0,
            arrival: ArriveParams::default(),
        }
    }

    pub fn target(&self) -> &WeakSteerable<V> {
        &self.target
    }

    pub fn set_target(&mut self, target: WeakSteerable<V>) {
        self.target = target;
    }

    pub fn proximity(&self) -> &ProximityRef<V> {
        &self.proximity
    }

    pub fn set_proximity(&mut self, proximity: ProximityRef<V>) {
        self.proximity = proximity;
    }
}

tunables! {
    impl [V: Vector] Hide<V> {
        distance_from_boundary: f32,
        max_linear_acceleration via arrival: f32,
        max_speed via arrival: f32,
        arrival_tolerance via arrival: f32,
        deceleration_radius via arrival: f32,
        time_to_target via arrival: f32,
    }
}

/// On the far side of the obstacle from the threat, just clear of its boundary
fn hiding_spot<V: Vector>(obstacle: V, radius: f32, threat: V) -> V {
    obstacle.add_scaled((obstacle - threat).normalize_or_zero(), radius)
}

impl<V: Vector> SteeringBehaviour<V> for Hide<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let target = upgrade_or_zero!(self.target, steering, "target");
        let threat = target.borrow().position();
        let position = owner.position();
        let distance_from_boundary = self.distance_from_boundary;

        let mut best: Option<(f32, V)> = None;
        self.proximity.borrow().find_neighbours(&mut |obstacle| {
            let spot = hiding_spot(
                obstacle.position(),
                obstacle.bounding_radius() + distance_from_boundary,
                threat,
            );
            let distance = position.distance_squared(spot);
            match best {
                Some((closest, _)) if closest <= distance => false,
                _ => {
                    best = Some((distance, spot));
                    true
                }
            }
        });

        match best {
            Some((_, spot)) => primitives::arrive(owner, spot, &self.arrival, steering),
            None => {
                steering.set_zero();
            }
        }
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
    use crate::proximity::{Population, RadiusProximity};
    use crate::steerable::downgrade;

    #[test]
    fn hides_behind_closest_obstacle() {
        let obstacles = Population::new();
        for (pos, radius) in [(vec2(0.0, 20.0), 5.0), (vec2(50.0, 50.0), 5.0)].iter() {
            obstacles.push(&Agent::new(*pos, *radius, FullLimiter::default()).into_shared());
        }

        let hider = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let threat = Agent::new(vec2(0.0, -100.0), 1.0, FullLimiter::default()).into_shared();
        let proximity = Rc::new(RefCell::new(RadiusProximity::new(downgrade(&hider), obstacles, 500.0)));

        let mut hide = Hide::new(downgrade(&hider), downgrade(&threat), proximity)
            .with_distance_from_boundary(10.0)
            .with_max_linear_acceleration(100.0);

        let mut steering = SteeringAcceleration::zero();
        hide.calculate_steering(&mut steering);
        assert!(steering.linear.abs_diff_eq(vec2(0.0, 100.0), 1e-3));

        // arrived at (0, 35)
        hider.borrow_mut().set_position(vec2(0.0, 35.0));
        hide.calculate_steering(&mut steering);
        assert!(steering.is_zero());
    }

    #[test]
    fn nowhere_to_hide() {
        let hider = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let threat = Agent::new(vec2(0.0, -100.0), 1.0, FullLimiter::default()).into_shared();
        let proximity = Rc::new(RefCell::new(RadiusProximity::new(
            downgrade(&hider),
            Population::new(),
            500.0,
        )));

        let mut steering = SteeringAcceleration::new(Vec2::ONE, 1.0);
        Hide::new(downgrade(&hider), downgrade(&threat), proximity).calculate_steering(&mut steering);
        assert!(steering.is_zero());
    }
}
