//! Group behaviours driven by a shared proximity. No neighbours means no steering
use crate::acceleration::SteeringAcceleration;
use crate::behaviour::primitives::{self, AlignParams};
use crate::behaviour::{behaviour_state, BehaviourState, SteeringBehaviour};
use crate::proximity::ProximityRef;
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Pushes away from neighbours, closer ones pushing harder
pub struct Separation<V: Vector> {
    state: BehaviourState<V>,
    proximity: ProximityRef<V>,
    max_linear_acceleration: f32,
}

/// Heads for the centre of mass of the neighbours
pub struct Cohesion<V: Vector> {
    state: BehaviourState<V>,
    proximity: ProximityRef<V>,
    max_linear_acceleration: f32,
}

/// Turns to the average heading of the neighbours and matches their average velocity
pub struct Alignment<V: Vector> {
    state: BehaviourState<V>,
    proximity: ProximityRef<V>,
    max_linear_acceleration: f32,
    align: AlignParams,
}

macro_rules! group_behaviour {
    ($ty:ident { $($extra:ident: $init:expr),* }) => {
        impl<V: Vector> $ty<V> {
            pub fn new(
                owner: WeakSteerable<V>,
                proximity: ProximityRef<V>,
                max_linear_acceleration: f32,
            ) -> Self {
                Self {
                    state: BehaviourState::new(owner),
                    proximity,
                    max_linear_acceleration,
                    $($extra: $init),*
                }
            }

            pub fn proximity(&self) -> &ProximityRef<V> {
                &self.proximity
            }

            pub fn set_proximity(&mut self, proximity: ProximityRef<V>) {
                self.proximity = proximity;
            }
        }
    };
}

group_behaviour!(Separation {});
group_behaviour!(Cohesion {});
group_behaviour!(Alignment {
    align: AlignParams::default()
});

tunables! {
    impl [V: Vector] Separation<V> {
        max_linear_acceleration: f32,
    }
}

tunables! {
    impl [V: Vector] Cohesion<V> {
        max_linear_acceleration: f32,
    }
}

tunables! {
    impl [V: Vector] Alignment<V> {
        max_linear_acceleration: f32,
        max_angular_acceleration via align: f32,
        max_rotation via align: f32,
        align_tolerance via align: f32,
        deceleration_radius via align: f32,
        time_to_target via align: f32,
    }
}

impl<V: Vector> SteeringBehaviour<V> for Separation<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let position = owner.position();
        let mut repulsion = owner.new_vector();

        self.proximity.borrow().find_neighbours(&mut |neighbour| {
            let away = position - neighbour.position();
            let distance_squared = away.length_squared();
            if distance_squared > 0.0 {
                repulsion += away * distance_squared.recip();
            }
            true
        });

        steering.linear = repulsion.normalize_or_zero() * self.max_linear_acceleration;
        steering.angular = 0.0;
    }
}

impl<V: Vector> SteeringBehaviour<V> for Cohesion<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let mut centre = owner.new_vector();
        let count = self.proximity.borrow().find_neighbours(&mut |neighbour| {
            centre += neighbour.position();
            true
        });

        if count == 0 {
            steering.set_zero();
            return;
        }

        centre = centre * (count as f32).recip();
        primitives::seek(owner, centre, self.max_linear_acceleration, steering);
    }
}

impl<V: Vector> SteeringBehaviour<V> for Alignment<V> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let mut heading = owner.new_vector();
        let mut velocity = owner.new_vector();
        let count = self.proximity.borrow().find_neighbours(&mut |neighbour| {
            heading += V::from_orientation(neighbour.orientation());
            velocity += neighbour.linear_velocity();
            true
        });

        if count == 0 {
            steering.set_zero();
            return;
        }

        // opposing headings can cancel out
        if heading.is_zero(f32::EPSILON) {
            steering.angular = 0.0;
        } else {
            primitives::reach_orientation(owner, heading.to_orientation(), &self.align, steering);
        }

        let velocity = velocity * (count as f32).recip();
        steering.linear =
            (velocity - owner.linear_velocity()).limit(self.max_linear_acceleration);
    }
}
