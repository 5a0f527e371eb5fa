//! Policies for finding the agents a behaviour should react to
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use common::*;

use crate::steerable::{is_same_agent, Steerable, SteerableRef, WeakSteerable};
use crate::vector::Vector;

pub use field_of_view::FieldOfViewProximity;
pub use infinite::InfiniteProximity;
pub use radius::RadiusProximity;

mod field_of_view;
mod infinite;
mod radius;

pub trait Proximity<V: Vector> {
    fn owner(&self) -> &WeakSteerable<V>;
    fn set_owner(&mut self, owner: WeakSteerable<V>);

    fn agents(&self) -> &Population<V>;
    fn set_agents(&mut self, agents: Population<V>);

    /// Calls `callback` for every agent that passes this policy, never the owner. Returns how
    /// many calls returned true
    fn find_neighbours(&self, callback: &mut dyn FnMut(&dyn Steerable<V>) -> bool) -> usize;
}

/// Shared so several behaviours and any tuning layer see the same settings
pub type ProximityRef<V> = Rc<RefCell<dyn Proximity<V>>>;

/// Growable group of agents shared between proximities. Agents pushed later are seen by every
/// proximity observing the group
pub struct Population<V: Vector>(Rc<RefCell<Vec<SteerableRef<V>>>>);

impl<V: Vector> Population<V> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn push<S: Steerable<V> + 'static>(&self, agent: &Rc<RefCell<S>>) {
        let agent: SteerableRef<V> = agent.clone();
        self.push_ref(agent);
    }

    pub fn push_ref(&self, agent: SteerableRef<V>) {
        self.0.borrow_mut().push(agent);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Must not be held while agents are pushed
    pub fn agents(&self) -> Ref<Vec<SteerableRef<V>>> {
        self.0.borrow()
    }
}

impl<V: Vector> Clone for Population<V> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<V: Vector> Default for Population<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vector> Debug for Population<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Population({} agents)", self.len())
    }
}

/// Owner and agents common to every proximity
#[derive(Debug, Clone)]
pub(crate) struct ProximityState<V: Vector> {
    pub owner: WeakSteerable<V>,
    pub agents: Population<V>,
}

impl<V: Vector> ProximityState<V> {
    pub fn new(owner: WeakSteerable<V>, agents: Population<V>) -> Self {
        Self { owner, agents }
    }

    /// Offers every agent except the owner to `filter`, then `callback` for those that pass
    pub fn visit(
        &self,
        mut filter: impl FnMut(&dyn Steerable<V>, &dyn Steerable<V>) -> bool,
        callback: &mut dyn FnMut(&dyn Steerable<V>) -> bool,
    ) -> usize {
        let owner = match self.owner.upgrade() {
            Some(owner) => owner,
            None => {
                trace!("proximity owner has been dropped, no neighbours");
                return 0;
            }
        };

        let agents = self.agents.agents();
        let owner_ref = owner.borrow();
        let mut count = 0;
        for agent in agents.iter().filter(|a| !is_same_agent(a, &self.owner)) {
            let agent = agent.borrow();
            if filter(&*owner_ref, &*agent) && callback(&*agent) {
                count += 1;
            }
        }

        count
    }
}

/// Implements the owner and agent accessors of [Proximity] for a struct with a `state` field
macro_rules! proximity_state {
    () => {
        fn owner(&self) -> &$crate::steerable::WeakSteerable<V> {
            &self.state.owner
        }

        fn set_owner(&mut self, owner: $crate::steerable::WeakSteerable<V>) {
            self.state.owner = owner;
        }

        fn agents(&self) -> &$crate::proximity::Population<V> {
            &self.state.agents
        }

        fn set_agents(&mut self, agents: $crate::proximity::Population<V>) {
            self.state.agents = agents;
        }
    };
}
pub(crate) use proximity_state;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crate::limiter::FullLimiter;
    use crate::steerable::downgrade;

    #[test]
    fn population_is_shared() {
        let population = Population::<Vec2>::new();
        let observer = population.clone();
        assert!(observer.is_empty());

        let agent = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        population.push(&agent);
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn owner_is_never_visited() {
        let population = Population::<Vec2>::new();
        let agents = (0..4)
            .map(|i| Agent::new(vec2(i as f32, 0.0), 1.0, FullLimiter::default()).into_shared())
            .collect_vec();
        agents.iter().for_each(|a| population.push(a));

        let state = ProximityState::new(downgrade(&agents[2]), population);
        let mut seen = Vec::new();
        let count = state.visit(
            |_, _| true,
            &mut |n| {
                seen.push(n.position().x);
                true
            },
        );

        assert_eq!(count, 3);
        assert_eq!(seen, vec![0.0, 1.0, 3.0]);
    }

    #[test]
    fn dropped_owner_has_no_neighbours() {
        let population = Population::<Vec2>::new();
        let other = Agent::new(Vec2::ZERO, 1.0, FullLimiter::default()).into_shared();
        population.push(&other);

        let owner = Agent::new(Vec2::ONE, 1.0, FullLimiter::default()).into_shared();
        let state = ProximityState::new(downgrade(&owner), population);
        drop(owner);

        assert_eq!(state.visit(|_, _| true, &mut |_| true), 0);
    }
}
