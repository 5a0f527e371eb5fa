use crate::proximity::{proximity_state, Population, Proximity, ProximityState};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Every agent in the population is a neighbour
#[derive(Debug, Clone)]
pub struct InfiniteProximity<V: Vector> {
    state: ProximityState<V>,
}

impl<V: Vector> InfiniteProximity<V> {
    pub fn new(owner: WeakSteerable<V>, agents: Population<V>) -> Self {
        Self {
            state: ProximityState::new(owner, agents),
        }
    }
}

impl<V: Vector> Proximity<V> for InfiniteProximity<V> {
    proximity_state!();

    fn find_neighbours(&self, callback: &mut dyn FnMut(&dyn Steerable<V>) -> bool) -> usize {
        self.state.visit(|_, _| true, callback)
    }
}
