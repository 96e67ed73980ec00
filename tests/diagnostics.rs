//! Counts the warnings each operation emits. The logger records per
//! thread so tests running in parallel do not see each other's output.

mod common;

use std::cell::RefCell;
use std::sync::Once;

use fitloader::FitsLoader;
use log::{Level, LevelFilter, Log, Metadata, Record};
use tempfile::TempDir;

use common::{write_fit, write_garbage};

thread_local! {
    static WARNINGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct Capture;

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture;
static INIT: Once = Once::new();

fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    INIT.call_once(|| {
        log::set_logger(&CAPTURE).expect("logger already set");
        log::set_max_level(LevelFilter::Warn);
    });
    WARNINGS.with(|w| w.borrow_mut().clear());
    let out = f();
    let warnings = WARNINGS.with(|w| w.take());
    (out, warnings)
}

#[test]
fn no_warnings_for_non_fit_files() {
    let tmp = TempDir::new().unwrap();
    write_garbage(&tmp.path().join("junk.fits"));
    write_garbage(&tmp.path().join("junk.txt"));

    let mut loader = FitsLoader::new(tmp.path());
    let (report, warnings) = capture(|| loader.load_images().unwrap());
    assert_eq!(report.loaded(), 0);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn one_warning_per_failed_file() {
    let tmp = TempDir::new().unwrap();
    write_fit(&tmp.path().join("good1.fit"), 2, 2, 0, &[]);
    write_fit(&tmp.path().join("good2.fit"), 2, 2, 0, &[]);
    write_garbage(&tmp.path().join("bad1.fit"));
    write_garbage(&tmp.path().join("bad2.fit"));
    write_garbage(&tmp.path().join("bad3.fit"));

    let mut loader = FitsLoader::new(tmp.path());
    let (report, warnings) = capture(|| loader.load_images().unwrap());
    assert_eq!(loader.len(), 2);
    assert_eq!(report.failed(), 3);
    assert_eq!(warnings.len(), 3);
    assert!(warnings.iter().all(|w| w.starts_with("Error reading ")));
    assert!(warnings.iter().any(|w| w.contains("bad2.fit")));
}

#[test]
fn one_warning_when_no_fit_files() {
    let tmp = TempDir::new().unwrap();
    let loader = FitsLoader::new(tmp.path());
    let (value, warnings) = capture(|| loader.header_value("EXPTIME"));
    assert!(value.is_none());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("No fits files"));
}

#[test]
fn one_warning_for_missing_key() {
    let tmp = TempDir::new().unwrap();
    write_fit(&tmp.path().join("a.fit"), 2, 2, 0, &[("EXPTIME", "30.0")]);
    let loader = FitsLoader::new(tmp.path());
    let (value, warnings) = capture(|| loader.header_value("NOPE"));
    assert!(value.is_none());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Argument NOPE not found"));
}

#[test]
fn found_key_is_silent() {
    let tmp = TempDir::new().unwrap();
    write_fit(&tmp.path().join("a.fit"), 2, 2, 0, &[("EXPTIME", "30.0")]);
    let loader = FitsLoader::new(tmp.path());
    let (value, warnings) = capture(|| loader.header_value("EXPTIME"));
    assert_eq!(value.and_then(|v| v.as_float()), Some(30.0));
    assert!(warnings.is_empty());
}
