//! Utility module for command line interfaces

use crate::{run_dir::DEFAULT_PREFIX, time_request::TIME_FILE_NAME};
use std::{error::Error, fmt, fmt::Display, path::PathBuf};

/// An error struct to wrap simple static error messages
#[derive(Debug)]
pub struct CliErr(pub &'static str);

impl Display for CliErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Error for CliErr {}

/// Settings shared by both binaries.
///
/// The only positional argument is the directory holding the run directories (defaults to the working directory).
/// Everything else can be overridden through environment variables:
///
/// - `ROOMS_DIR_PREFIX`: prefix of run directory names
/// - `ROOMS_SEED`: seed for generating rooms
/// - `ROOMS_TIME_FILE`: path of the time file
/// - `ROOMS_REPORT`: if set, the adventure reports its run on stderr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_dir: PathBuf,
    pub dir_prefix: String,
    pub seed: Option<u64>,
    pub time_file: PathBuf,
    pub report: bool,
}

impl Config {
    /// Read the config from the process arguments and environment.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_parts(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Build the config from arguments (without the program name) and a variable lookup.
    pub fn from_parts(args: impl IntoIterator<Item = String>, var: impl Fn(&str) -> Option<String>) -> Result<Config, Box<dyn Error>> {
        let mut args = args.into_iter();
        let base_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);
        if args.next().is_some() {
            return Err(Box::new(CliErr("Too many args given, expected at most a base directory")));
        }

        let seed = match var("ROOMS_SEED") {
            Some(seed) => Some(seed.parse::<u64>().map_err(|_| CliErr("ROOMS_SEED has to be an unsigned integer"))?),
            None => None,
        };
        let time_file = var("ROOMS_TIME_FILE").map_or_else(|| base_dir.join(TIME_FILE_NAME), PathBuf::from);

        Ok(Config {
            dir_prefix: var("ROOMS_DIR_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            seed,
            time_file,
            report: var("ROOMS_REPORT").is_some(),
            base_dir,
        })
    }
}

/// Set up `env_logger`, showing warnings and errors unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init();
}
