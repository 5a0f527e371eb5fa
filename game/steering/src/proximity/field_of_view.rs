use crate::proximity::radius::within_radius;
use crate::proximity::{proximity_state, Population, Proximity, ProximityState};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Agents within the radius and inside a cone around the owner's heading
#[derive(Debug, Clone)]
pub struct FieldOfViewProximity<V: Vector> {
    state: ProximityState<V>,
    radius: f32,
    /// Full width of the cone, radians
    angle: f32,
}

impl<V: Vector> FieldOfViewProximity<V> {
    pub fn new(owner: WeakSteerable<V>, agents: Population<V>, radius: f32, angle: f32) -> Self {
        Self {
            state: ProximityState::new(owner, agents),
            radius,
            angle,
        }
    }
}

tunables! {
    impl [V: Vector] FieldOfViewProximity<V> {
        radius: f32,
        angle: f32,
    }
}

impl<V: Vector> Proximity<V> for FieldOfViewProximity<V> {
    proximity_state!();

    fn find_neighbours(&self, callback: &mut dyn FnMut(&dyn Steerable<V>) -> bool) -> usize {
        let radius = self.radius;
        let cone_threshold = (self.angle * 0.5).cos();

        self.state.visit(
            |owner, n| {
                if !within_radius(owner, n, radius) {
                    return false;
                }

                let to_agent = n.position() - owner.position();
                if to_agent.is_zero(f32::EPSILON) {
                    return true;
                }

                let heading = V::from_orientation(owner.orientation());
                heading.dot(to_agent.normalize_or_zero()) > cone_threshold
            },
            callback,
        )
    }
}
