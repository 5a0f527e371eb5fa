//! Paths that agents can follow, measured by arc length from their start
pub use line::{LinePath, LinePathParam, PathError, Segment};

use crate::vector::Vector;

mod line;

/// Per-follower cursor into a path
pub trait PathParam {
    /// Arc length along the path of the last matched position
    fn distance(&self) -> f32;

    fn set_distance(&mut self, distance: f32);
}

pub trait Path<V: Vector> {
    type Param: PathParam;

    fn create_param(&self) -> Self::Param;

    fn length(&self) -> f32;

    fn start_point(&self) -> V;

    fn end_point(&self) -> V;

    /// Arc length of the point on the path nearest to `agent_position`, also stored in `param`
    fn calculate_distance(&self, agent_position: V, param: &mut Self::Param) -> f32;

    /// Point at `target_distance` along the path, wrapping around if outside the path's length
    fn calculate_target_position(&self, param: &Self::Param, target_distance: f32) -> V;
}
