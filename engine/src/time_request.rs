//! Fetching the wall clock time through a worker thread and a shared file.
//!
//! Each request spawns exactly one worker which formats the current local time and overwrites the time file.
//! The requesting thread joins the worker before it reads the file back, so the read always observes a complete write.
//! The file path sits behind a mutex, so the worker and the requesting thread only reach the file through its guard.

use crate::error::{at, Error, Result};
use crossbeam_utils::thread;
use log::debug;
use std::{
    fs::{self, File},
    io::{prelude::*, BufReader},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

/// Default name of the time file.
pub const TIME_FILE_NAME: &str = "currentTime.txt";
/// `strftime` format of the time file contents, e.g. ` 1:03pm, Tuesday, September 13, 2016`.
pub const TIME_FORMAT: &str = "%l:%M%P, %A, %B %d, %Y";

/// Handle to the time file shared by the requesting thread and the worker.
/// The path is only reachable through the lock, so whoever holds the guard owns the file.
#[derive(Debug)]
pub struct TimeFile {
    file: Mutex<PathBuf>,
}

impl TimeFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> TimeFile {
        TimeFile { file: Mutex::new(path.into()) }
    }

    pub fn path(&self) -> PathBuf {
        self.file.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Let a fresh worker write the current time into the file, wait for it and return the line it wrote.
    pub fn request(&self) -> Result<String> {
        thread::scope(|scope| -> Result<()> {
            let worker = scope
                .builder()
                .name("time-writer".to_string())
                .spawn(|_| self.write_current_time())
                .map_err(Error::SpawnWorker)?;
            worker.join().map_err(|_| Error::WorkerPanicked)?
        })
        .map_err(|_| Error::WorkerPanicked)??;

        let path = self.file.lock().map_err(|_| Error::LockPoisoned)?;
        read_line(&path)
    }

    fn write_current_time(&self) -> Result<()> {
        let path = self.file.lock().map_err(|_| Error::LockPoisoned)?;
        let stamp = format_time(&time::now())?;
        debug!("writing {:?} to {}", stamp, path.display());
        fs::write(&*path, format!("{}\n", stamp)).map_err(at(&*path))
    }
}

fn read_line(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path).map_err(at(path))?);
    let mut line = String::new();
    reader.read_line(&mut line).map_err(at(path))?;

    let line = line.strip_suffix('\n').unwrap_or(&line);
    if line.is_empty() {
        return Err(Error::EmptyTimeFile { path: path.to_path_buf() });
    }
    Ok(line.to_string())
}

/// Format a point in time the way it is stored in the time file.
pub fn format_time(tm: &time::Tm) -> Result<String> {
    Ok(tm.strftime(TIME_FORMAT)?.to_string())
}
