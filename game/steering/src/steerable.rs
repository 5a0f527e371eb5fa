use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::limiter::Limiter;
use crate::vector::Vector;

/// An agent that can be steered. Created and moved by the simulation, behaviours only observe it
pub trait Steerable<V: Vector>: Limiter {
    fn position(&self) -> V;

    /// Radians, see [Vector::to_orientation]
    fn orientation(&self) -> f32;

    fn linear_velocity(&self) -> V;

    fn angular_velocity(&self) -> f32;

    fn bounding_radius(&self) -> f32;

    /// Zero vector of the right dimensionality, where behaviours start their accumulators
    fn new_vector(&self) -> V {
        V::ZERO
    }
}

/// Shared handle to an agent owned by the simulation
pub type SteerableRef<V> = Rc<RefCell<dyn Steerable<V>>>;

/// What behaviours hold, they never keep an agent alive
pub type WeakSteerable<V> = Weak<RefCell<dyn Steerable<V>>>;

pub fn downgrade<V: Vector, S: Steerable<V> + 'static>(agent: &Rc<RefCell<S>>) -> WeakSteerable<V> {
    let agent: SteerableRef<V> = agent.clone();
    Rc::downgrade(&agent)
}

/// Identity comparison, ignoring vtables
pub(crate) fn is_same_agent<V: Vector>(a: &SteerableRef<V>, b: &WeakSteerable<V>) -> bool {
    Rc::as_ptr(a) as *const () == b.as_ptr() as *const ()
}
