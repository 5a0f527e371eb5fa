use common::*;

use crate::acceleration::SteeringAcceleration;
use crate::behaviour::{behaviour_state, primitives, BehaviourState, SteeringBehaviour};
use crate::path::Path;
use crate::steerable::{Steerable, WeakSteerable};
use crate::vector::Vector;

/// Seeks a point a fixed arc length ahead of the owner's position on the path. A negative offset
/// follows the path backwards
pub struct FollowPath<V: Vector, P: Path<V>> {
    state: BehaviourState<V>,
    path: P,
    param: P::Param,
    path_offset: f32,
    /// Seconds ahead to predict the owner's position, 0 uses the current position
    prediction_time: f32,
    max_linear_acceleration: f32,
    internal_target_position: V,
}

impl<V: Vector, P: Path<V>> FollowPath<V, P> {
    pub fn new(owner: WeakSteerable<V>, path: P, path_offset: f32) -> Self {
        let param = path.create_param();
        Self {
            state: BehaviourState::new(owner),
            path,
            param,
            path_offset,
            prediction_time: 0.0,
            max_linear_acceleration: 0.0,
            internal_target_position: V::ZERO,
        }
    }

    pub fn path(&self) -> &P {
        &self.path
    }

    /// Resets the cursor too
    pub fn set_path(&mut self, path: P) {
        self.param = path.create_param();
        self.path = path;
    }

    pub fn param(&self) -> &P::Param {
        &self.param
    }

    /// Point on the path targeted by the last calculation
    pub fn internal_target_position(&self) -> V {
        self.internal_target_position
    }
}

tunables! {
    impl [V: Vector, P: Path<V>] FollowPath<V, P> {
        path_offset: f32,
        prediction_time: f32,
        max_linear_acceleration: f32,
    }
}

impl<V: Vector, P: Path<V>> SteeringBehaviour<V> for FollowPath<V, P> {
    behaviour_state!();

    fn calculate_real_steering(
        &mut self,
        owner: &dyn Steerable<V>,
        steering: &mut SteeringAcceleration<V>,
    ) {
        let location = if self.prediction_time == 0.0 {
            owner.position()
        } else {
            owner
                .position()
                .add_scaled(owner.linear_velocity(), self.prediction_time)
        };

        let distance = self.path.calculate_distance(location, &mut self.param);
        let target_distance = distance + self.path_offset;
        self.internal_target_position =
            self.path.calculate_target_position(&self.param, target_distance);

        primitives::seek(
            owner,
            self.internal_target_position,
            self.max_linear_acceleration,
            steering,
        );
    }
}

impl<V: Vector, P: Path<V>> Debug for FollowPath<V, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FollowPath")
            .field("state", &self.state)
            .field("path_length", &self.path.length())
            .field("path_offset", &self.path_offset)
            .field("prediction_time", &self.prediction_time)
            .finish()
    }
}
