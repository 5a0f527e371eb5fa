use crate::proximity::{proximity_state, Population, Proximity, ProximityState};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Agents whose bounding circle overlaps the given radius around the owner
#[derive(Debug, Clone)]
pub struct RadiusProximity<V: Vector> {
    state: ProximityState<V>,
    radius: f32,
}

impl<V: Vector> RadiusProximity<V> {
    pub fn new(owner: WeakSteerable<V>, agents: Population<V>, radius: f32) -> Self {
        Self {
            state: ProximityState::new(owner, agents),
            radius,
        }
    }
}

tunables! {
    impl [V: Vector] RadiusProximity<V> {
        radius: f32,
    }
}

/// `distance² < (radius + neighbour radius)²`
pub(crate) fn within_radius<V: Vector>(
    owner: &dyn Steerable<V>,
    neighbour: &dyn Steerable<V>,
    radius: f32,
) -> bool {
    let range = radius + neighbour.bounding_radius();
    owner.position().distance_squared(neighbour.position()) < range * range
}

impl<V: Vector> Proximity<V> for RadiusProximity<V> {
    proximity_state!();

    fn find_neighbours(&self, callback: &mut dyn FnMut(&dyn Steerable<V>) -> bool) -> usize {
        let radius = self.radius;
        self.state
            .visit(|owner, n| within_radius(owner, n, radius), callback)
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
    fn neighbour_radius_extends_range() {
        let population = Population::new();
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let small = Agent::new(vec2(10.5, 0.0), 0.1, FullLimiter::default()).into_shared();
        let big = Agent::new(vec2(0.0, -10.5), 1.0, FullLimiter::default()).into_shared();
        let far = Agent::new(vec2(30.0, 0.0), 1.0, FullLimiter::default()).into_shared();
        population.push(&owner);
        population.push(&small);
        population.push(&big);
        population.push(&far);

        let mut proximity = RadiusProximity::new(downgrade(&owner), population, 10.0);
        let mut found = vec![];
        let count = proximity.find_neighbours(&mut |n| {
            found.push(n.position());
            true
        });
        assert_eq!(count, 1);
        assert_eq!(found, vec![vec2(0.0, -10.5)]);

        proximity.set_radius(100.0);
        assert_eq!(proximity.find_neighbours(&mut |_| true), 3);
    }

    #[test]
    fn count_only_includes_accepted() {
        let population = Population::new();
        let owner = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        let others = (1..=4)
            .map(|i| Agent::new(vec2(i as f32, 0.0), 1.0, FullLimiter::default()).into_shared())
            .collect_vec();
        others.iter().for_each(|a| population.push(a));

        let proximity = RadiusProximity::new(downgrade(&owner), population, 10.0);
        let count = proximity.find_neighbours(&mut |n| n.position().x > 2.0);
        assert_eq!(count, 2);
    }
}
