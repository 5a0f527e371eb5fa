use common::random::SmallRngExt;
use common::*;

use crate::acceleration::SteeringAcceleration;
use crate::behaviour::primitives::{self, AlignParams};
use crate::behaviour::{behaviour_state, BehaviourState, SteeringBehaviour};
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Drifts around by chasing a target that random walks along a circle projected in front of the
/// owner. The random source is a type parameter so a seeded one can be injected
pub struct Wander<V: Vector, R: Rng = SmallRng> {
    state: BehaviourState<V>,
    rng: R,

    /// Distance of the wander circle in front of the owner
    wander_offset: f32,
    wander_radius: f32,
    /// Maximum change of [wander_orientation] per tick
    wander_rate: f32,
    /// Current position of the target on the circle, relative to the owner's orientation
    wander_orientation: f32,
    max_linear_acceleration: f32,
    /// Turn towards the target, otherwise only accelerate forwards
    face_enabled: bool,
    align: AlignParams,

    wander_center: V,
    internal_target_position: V,
}

impl<V: Vector> Wander<V, SmallRng> {
    pub fn new(owner: WeakSteerable<V>) -> Self {
        Self::with_rng(owner, SmallRng::new_quick())
    }
}

impl<V: Vector, R: Rng> Wander<V, R> {
    pub fn with_rng(owner: WeakSteerable<V>, rng: R) -> Self {
        Self {
            state: BehaviourState::new(owner),
            rng,
            wander_offset: 0.0,
            wander_radius: 0.0,
            wander_rate: 0.0,
            wander_orientation: 0.0,
            max_linear_acceleration: 0.0,
            face_enabled: true,
            align: AlignParams::default(),
            wander_center: V::ZERO,
            internal_target_position: V::ZERO,
        }
    }

    /// Centre of the wander circle as of the last calculation
    pub fn wander_center(&self) -> V {
        self.wander_center
    }

    /// Target on the wander circle as of the last calculation
    pub fn internal_target_position(&self) -> V {
        self.internal_target_position
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

tunables! {
    impl [V: Vector, R: Rng] Wander<V, R> {
        wander_offset: f32,
        wander_radius: f32,
        wander_rate: f32,
        wander_orientation: f32,
        max_linear_acceleration: f32,
        face_enabled: bool,
        max_angular_acceleration via align: f32,
        max_rotation via align: f32,
        align_tolerance via align: f32,
        deceleration_radius via align: f32,
        time_to_target via align: f32,
    }
}

impl<V: Vector, R: Rng> SteeringBehaviour<V> for Wander<V, R> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        self.wander_orientation += self.rng.gen_range(-1.0f32, 1.0) * self.wander_rate;

        let heading = V::from_orientation(owner.orientation());
        let target_orientation = self.wander_orientation + owner.orientation();

        self.wander_center = owner.position().add_scaled(heading, self.wander_offset);
        self.internal_target_position = self
            .wander_center
            .add_scaled(V::from_orientation(target_orientation), self.wander_radius);

        if self.face_enabled {
            primitives::face(owner, self.internal_target_position, &self.align, steering);
        } else {
            steering.angular = 0.0;
        }

        steering.linear = heading * self.max_linear_acceleration;
    }
}

impl<V: Vector, R: Rng> Debug for Wander<V, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Wander")
            .field("state", &self.state)
            .field("wander_offset", &self.wander_offset)
            .field("wander_radius", &self.wander_radius)
            .field("wander_rate", &self.wander_rate)
            .field("wander_orientation", &self.wander_orientation)
            .field("face_enabled", &self.face_enabled)
            .finish()
    }
}
