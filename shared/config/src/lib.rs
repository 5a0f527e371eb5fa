pub use crate::config::*;
pub use crate::load::{dump, get, init, load_str, ConfigError, ConfigResult, ConfigType};

mod config;
mod load;
