//! Steering behaviours for autonomous agents, generic over 2D and 3D vectors.
//!
//! Every tick the owner of an agent asks its top level behaviour for a [SteeringAcceleration],
//! which it then applies to the agent itself. Behaviours only ever observe agents through weak
//! references and never move them.

#[macro_use]
mod macros;

pub use crate::acceleration::SteeringAcceleration;
pub use crate::agent::Agent;
pub use crate::behaviour::{BoxedBehaviour, SteeringBehaviour};
pub use crate::limiter::{FullLimiter, Limiter, NullLimiter};
pub use crate::steerable::{downgrade, Steerable, SteerableRef, WeakSteerable};
pub use crate::vector::{wrap_angle_around_zero, Vector};

mod acceleration;
mod agent;
pub mod behaviour;
pub mod combine;
mod limiter;
pub mod path;
pub mod proximity;
mod steerable;
mod vector;
