//! Structured reporting of a program run.
//!
//! Values are collected into a JSON object through the `report!` macro and written out as a single
//! line when the `ReportingGuard` returned by `enable_reporting` is dropped.
//! Nested objects are created with `push_context`; the returned guard closes the object when dropped.
//! As long as reporting is not enabled on the current thread, reporting anything is a no-op.

use crate::built_info;
use serde_json::{Map, Value};
use std::{cell::RefCell, io::Write, mem::swap};

pub use serde_json::json;

/// Where the report goes once the program is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSink {
    Stdout,
    Stderr,
}

#[derive(Debug)]
struct Reporter {
    current: Map<String, Value>,
    // enclosing objects together with the key the current object will be stored under
    context_stack: Vec<(Map<String, Value>, String)>,
    sink: ReportSink,
}

impl Reporter {
    fn new(sink: ReportSink) -> Self {
        Reporter {
            current: Map::new(),
            context_stack: Vec::new(),
            sink,
        }
    }

    fn create_object_under_key(&mut self, key: String) {
        let mut parent = Map::new();
        swap(&mut parent, &mut self.current);
        self.context_stack.push((parent, key));
    }

    fn report(&mut self, key: String, val: Value) {
        let prev = self.current.insert(key, val);
        if let Some(prev) = prev {
            log::debug!("report value {} overwritten", prev);
        }
    }

    fn pop_context(&mut self) {
        let (mut parent, key) = self.context_stack.pop().expect("tried to pop from empty context");
        let mut object = Map::new();
        swap(&mut object, &mut self.current);
        parent.insert(key, Value::Object(object));
        self.current = parent;
    }

    fn finish(&mut self) {
        assert!(self.context_stack.is_empty(), "reporting finished with open contexts");
        let mut object = Map::new();
        swap(&mut object, &mut self.current);
        let line = Value::Object(object).to_string();

        let written = match self.sink {
            ReportSink::Stdout => writeln!(std::io::stdout(), "{}", line),
            ReportSink::Stderr => writeln!(std::io::stderr(), "{}", line),
        };
        if let Err(err) = written {
            log::error!("could not write report: {}", err);
        }
    }
}

thread_local! {
    static REPORTER: RefCell<Option<Reporter>> = RefCell::new(None);
}

#[must_use]
pub struct ContextGuard(());

impl Drop for ContextGuard {
    fn drop(&mut self) {
        REPORTER.with(|reporter| reporter.borrow_mut().as_mut().map(Reporter::pop_context));
    }
}

/// Open a nested object under `key`. Everything reported until the guard is dropped ends up in it.
pub fn push_context(key: String) -> ContextGuard {
    REPORTER.with(|reporter| reporter.borrow_mut().as_mut().map(|r| r.create_object_under_key(key)));
    ContextGuard(())
}

pub fn report(key: String, val: Value) {
    REPORTER.with(|reporter| reporter.borrow_mut().as_mut().map(|r| r.report(key, val)));
}

#[must_use]
pub struct ReportingGuard(());

impl Drop for ReportingGuard {
    fn drop(&mut self) {
        REPORTER.with(|reporter| {
            if let Some(mut r) = reporter.borrow_mut().take() {
                r.finish();
            }
        });
    }
}

#[macro_export]
macro_rules! report {
    ($k:expr, $($json:tt)+) => { $crate::report::report($k.to_string(), $crate::report::json!($($json)+)) };
}

/// Start collecting a report for this thread. Build information, the program name,
/// the start time and the arguments are reported right away.
pub fn enable_reporting(program: &str, sink: ReportSink) -> ReportingGuard {
    REPORTER.with(|reporter| reporter.replace(Some(Reporter::new(sink))));

    report!("build_target", built_info::TARGET);
    report!("build_profile", built_info::PROFILE);
    report!("feature_flags", built_info::FEATURES_STR);
    report!("build_with_rustc", built_info::RUSTC_VERSION);
    report!("version", built_info::PKG_VERSION);

    report!("program", program);
    report!("start_time", format!("{}", time::now_utc().rfc822()));
    report!("args", std::env::args().collect::<Vec<String>>());

    ReportingGuard(())
}

/// Is a report being collected on this thread?
pub fn is_reporting() -> bool {
    REPORTER.with(|reporter| reporter.borrow().is_some())
}

pub mod benchmark;
pub use benchmark::*;
