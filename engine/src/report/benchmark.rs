//! A few utilities to measure how long things take.

use super::*;
use log::info;
use std::sync::atomic::{compiler_fence, Ordering::SeqCst};
use std::time::*;

/// This function will measure how long it takes to execute the given lambda,
/// log the time, report it and return the result of the lambda.
pub fn report_time<Out, F: FnOnce() -> Out>(name: &str, f: F) -> Out {
    compiler_fence(SeqCst);
    let start = Instant::now();
    info!("starting {}", name);
    let res = f();
    let t_passed = start.elapsed();
    compiler_fence(SeqCst);
    let t_passed = t_passed.as_secs_f64() * 1000.0;
    info!("{} done - took: {}ms", name, t_passed);
    report!("running_time_ms", t_passed);
    res
}

/// A struct to repeatedly measure the time passed since the timer was started
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create and start a new `Timer`
    pub fn new() -> Timer {
        Timer { start: Instant::now() }
    }

    /// Return the number of ms passed since the timer was started
    pub fn get_passed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}
