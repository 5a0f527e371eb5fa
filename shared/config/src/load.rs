use std::borrow::Cow;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arc_swap::{ArcSwap, Guard};
use notify::{watcher, DebouncedEvent, RecursiveMode, Watcher};
use once_cell::sync::OnceCell;

use common::*;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parsing(#[from] ron::de::Error),

    #[error("Failed to watch config file: {0}")]
    Notify(#[from] notify::Error),

    #[error("Path is not a file")]
    NotAFile,

    #[error("Config has already been initialised")]
    AlreadyInitialised,
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

pub enum ConfigType<'a> {
    String(&'a str),
    WatchedFile(&'a Path),
}

/// Set once by [init], swapped in place on every reload
static CONFIG: OnceCell<ArcSwap<Config>> = OnceCell::new();

/// Must be called once only, and before [get]
pub fn init(cfg: ConfigType) -> ConfigResult<()> {
    if CONFIG.get().is_some() {
        return Err(ConfigError::AlreadyInitialised);
    }

    // parse config and fail early
    let config = cfg.load()?;

    if CONFIG.set(ArcSwap::from_pointee(config)).is_err() {
        return Err(ConfigError::AlreadyInitialised);
    }

    // watch directory for changes if requested
    if let ConfigType::WatchedFile(path) = cfg {
        watch(path)?;
    }

    Ok(())
}

/// Parses without touching the global config
pub fn load_str(s: &str) -> ConfigResult<Config> {
    ConfigType::String(s).load()
}

/// Pretty RON, suitable as a starting point for a config file
pub fn dump(cfg: &Config) -> ConfigResult<String> {
    let pretty = ron::ser::PrettyConfig::new();
    ron::ser::to_string_pretty(cfg, pretty).map_err(ConfigError::Parsing)
}

/// Current config snapshot, later reloads are not reflected in the returned value.
///
/// Panics if [init] has not succeeded
pub fn get() -> impl Deref<Target = Config> {
    let cfg = CONFIG.get().expect("config has not been initialised");
    Guard::into_inner(cfg.load())
}

fn watch(path: &Path) -> ConfigResult<()> {
    let path = path.to_owned();
    let watch_dir = path.parent().ok_or(ConfigError::NotAFile)?.to_owned();
    let watch_file = path.file_name().ok_or(ConfigError::NotAFile)?.to_owned();

    let (tx, rx) = channel();
    let mut watcher = watcher(tx, Duration::from_secs(1))?;
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

    // start watcher thread
    thread::Builder::new()
        .name("cfg-watcher".to_owned())
        .spawn(move || {
            let _watcher = watcher; // keep alive
            let channel = rx;
            let is_config = |p: &PathBuf| p.file_name().map(|f| f == watch_file).unwrap_or(false);

            loop {
                let reload = match channel.recv() {
                    Ok(e) => match e {
                        DebouncedEvent::Write(ref p) if is_config(p) => true,
                        DebouncedEvent::Remove(ref p) if is_config(p) => {
                            warn!("config was deleted");
                            true
                        }
                        DebouncedEvent::Rename(ref a, ref b) if is_config(a) || is_config(b) => {
                            warn!("config was renamed");
                            true
                        }
                        _ => false,
                    },
                    Err(e) => {
                        // sender is gone, nothing more will arrive
                        warn!("stopped watching config"; "error" => %e);
                        break;
                    }
                };

                if reload {
                    info!("config was modified, reloading"; "path" => %path.display());

                    match ConfigType::WatchedFile(&path).load() {
                        Ok(config) => {
                            if let Some(cfg) = CONFIG.get() {
                                let new = Arc::new(config);
                                let new_ptr = Arc::as_ptr(&new);
                                let old = cfg.swap(new);
                                let old_ptr = Arc::as_ptr(&old);

                                debug!("swapped config instance"; "new" => ?new_ptr, "old" => ?old_ptr);
                            }
                        }
                        Err(e) => {
                            warn!("failed to reload config"; "error" => %e);
                        }
                    }
                }
            }
        })?;

    Ok(())
}

impl<'a> ConfigType<'a> {
    fn load(&self) -> ConfigResult<Config> {
        let bytes = match self {
            ConfigType::String(s) => Cow::Borrowed(*s),
            ConfigType::WatchedFile(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotAFile);
                }
                let contents = std::fs::read_to_string(*path)?;
                Cow::Owned(contents)
            }
        };

        ron::de::from_str(&bytes).map_err(ConfigError::Parsing)
    }
}
