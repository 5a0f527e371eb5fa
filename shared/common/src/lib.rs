pub use float_cmp::ApproxEq;
pub use itertools::*;
pub use rand::{self, prelude::*};
pub use thiserror::{self, Error};

pub use logging::{self, prelude::*, slog_value_debug};

// misc imports that annoyingly get resolved to other pub exports of std/core
// https://github.com/intellij-rust/intellij-rust/issues/5654
pub use std::{
    error::Error,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    marker::PhantomData,
};

pub type BoxedResult<T> = Result<T, Box<dyn Error>>;

pub use glam::{self, vec2, vec3, Vec2, Vec3};

pub mod random;
