pub use arrive::Arrive;
pub use avoid::CollisionAvoidance;
pub use flocking::{Alignment, Cohesion, Separation};
pub use follow::FollowPath;
pub use hide::Hide;
pub use orientation::{Align, Face, LookWhereYouAreGoing};
pub use primitives::{AlignParams, ArriveParams};
pub use pursue::{Evade, Pursue};
pub use seek::{Flee, Seek};
pub use wander::Wander;

use common::*;

use crate::acceleration::SteeringAcceleration;
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

mod arrive;
mod avoid;
mod flocking;
mod follow;
mod hide;
mod orientation;
pub mod primitives;
mod pursue;
mod seek;
mod wander;

/// Produces a steering acceleration for its owner every tick
pub trait SteeringBehaviour<V: Vector> {
    fn state(&self) -> &BehaviourState<V>;
    fn state_mut(&mut self) -> &mut BehaviourState<V>;

    /// Must overwrite both components of `steering`, it may hold anything from a previous call
    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    );

    /// Zero if disabled or the owner no longer exists
    fn calculate_steering<'a>(
        &mut self,
        steering: &'a mut SteeringAcceleration<V>,
    ) -> &'a mut SteeringAcceleration<V> {
        if !self.is_enabled() {
            return steering.set_zero();
        }

        let owner = match self.state().owner.upgrade() {
            Some(owner) => owner,
            None => {
                trace!("owner has been dropped, no steering");
                return steering.set_zero();
            }
        };

        let owner = owner.borrow();
        self.calculate_real_steering(&*owner, steering);
        steering
    }

    fn is_enabled(&self) -> bool {
        self.state().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.state_mut().enabled = enabled;
    }

    fn owner(&self) -> &WeakSteerable<V> {
        &self.state().owner
    }

    fn set_owner(&mut self, owner: WeakSteerable<V>) {
        self.state_mut().owner = owner;
    }
}

/// Boxed behaviour, as held by combinators
pub type BoxedBehaviour<V> = Box<dyn SteeringBehaviour<V>>;

/// What every behaviour carries regardless of what it does
#[derive(Clone)]
pub struct BehaviourState<V: Vector> {
    owner: WeakSteerable<V>,
    enabled: bool,
}

impl<V: Vector> BehaviourState<V> {
    pub fn new(owner: WeakSteerable<V>) -> Self {
        Self {
            owner,
            enabled: true,
        }
    }
}

impl<V: Vector> Debug for BehaviourState<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BehaviourState")
            .field("owner_alive", &(self.owner.strong_count() > 0))
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Implements the state accessors of [SteeringBehaviour] for a struct with a `state` field
macro_rules! behaviour_state {
    () => {
        fn state(&self) -> &$crate::behaviour::BehaviourState<V> {
            &self.state
        }

        fn state_mut(&mut self) -> &mut $crate::behaviour::BehaviourState<V> {
            &mut self.state
        }
    };
}
pub(crate) use behaviour_state;
