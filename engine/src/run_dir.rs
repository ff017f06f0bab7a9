//! Run directories: one per builder run, named by a fixed prefix and the process id.

use crate::error::{at, Error, Result};
use log::{debug, warn};
use std::{
    fs::{self, DirBuilder},
    io::ErrorKind,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Default prefix of every run directory name.
pub const DEFAULT_PREFIX: &str = "rooms.";

/// Create the run directory `<base>/<prefix><pid>`, readable and executable by everyone, writable by the owner.
/// An already existing directory is reused.
pub fn create_run_dir(base: &Path, prefix: &str) -> Result<PathBuf> {
    let path = base.join(format!("{}{}", prefix, std::process::id()));

    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    match builder.create(&path) {
        Ok(()) => Ok(path),
        Err(err) if err.kind() == ErrorKind::AlreadyExists && path.is_dir() => {
            warn!("run directory {} already exists, reusing it", path.display());
            Ok(path)
        }
        Err(err) => Err(at(&path)(err)),
    }
}

/// Find the most recently modified directory in `base` whose name starts with `prefix`.
///
/// Returns `None` if there is no such directory or `base` can not be searched.
/// When several directories share the newest modification time, the one seen last wins.
pub fn newest_run_dir(base: &Path, prefix: &str) -> Option<PathBuf> {
    let base_str = match base.to_str() {
        Some(base_str) => base_str,
        None => {
            warn!("{}", Error::NonUnicodePath { path: base.to_path_buf() });
            return None;
        }
    };
    if let Err(err) = fs::read_dir(base) {
        warn!("could not open {}: {}", base.display(), err);
        return None;
    }

    let pattern = format!("{}/{}*", glob::Pattern::escape(base_str), glob::Pattern::escape(prefix));
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("{}", Error::from(err));
            return None;
        }
    };

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                debug!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("skipping {}: {}", path.display(), err);
                continue;
            }
        };
        if !metadata.is_dir() {
            continue;
        }
        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(err) => {
                debug!("skipping {}: {}", path.display(), err);
                continue;
            }
        };

        if newest.as_ref().map_or(true, |(time, _)| modified >= *time) {
            newest = Some((modified, path));
        }
    }

    newest.map(|(_, path)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        fs::File,
        time::{Duration, UNIX_EPOCH},
    };

    fn touch_dir(path: &Path, secs: u64) {
        fs::create_dir(path).unwrap();
        File::open(path).unwrap().set_modified(UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
    }

    #[test]
    fn picks_latest_modification_time() {
        let base = tempfile::tempdir().unwrap();
        touch_dir(&base.path().join("rooms.1"), 1_000);
        touch_dir(&base.path().join("rooms.3"), 3_000);
        touch_dir(&base.path().join("rooms.2"), 2_000);

        assert_eq!(newest_run_dir(base.path(), "rooms."), Some(base.path().join("rooms.3")));
    }

    #[test]
    fn equal_times_pick_the_last_seen() {
        let base = tempfile::tempdir().unwrap();
        touch_dir(&base.path().join("rooms.1"), 5);
        touch_dir(&base.path().join("rooms.2"), 5);

        // glob yields entries in sorted order
        assert_eq!(newest_run_dir(base.path(), "rooms."), Some(base.path().join("rooms.2")));
    }

    #[test]
    fn ignores_other_entries() {
        let base = tempfile::tempdir().unwrap();
        touch_dir(&base.path().join("rooms.1"), 1_000);
        touch_dir(&base.path().join("other.2"), 5_000);
        File::create(base.path().join("rooms.file")).unwrap();

        assert_eq!(newest_run_dir(base.path(), "rooms."), Some(base.path().join("rooms.1")));
        assert_eq!(newest_run_dir(base.path(), "missing."), None);
    }

    #[test]
    fn missing_base_yields_nothing() {
        let base = tempfile::tempdir().unwrap();
        assert_eq!(newest_run_dir(&base.path().join("nope"), "rooms."), None);
    }

    #[test]
    fn created_dir_uses_pid() {
        let base = tempfile::tempdir().unwrap();
        let dir = create_run_dir(base.path(), "rooms.").unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir.file_name().unwrap().to_str().unwrap(), format!("rooms.{}", std::process::id()));
        assert_eq!(create_run_dir(base.path(), "rooms.").unwrap(), dir);
        assert_eq!(newest_run_dir(base.path(), "rooms."), Some(dir));
    }
}
