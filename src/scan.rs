//! scan — bounded parallel symbol detection over input images.
//!
//! Each image is independent, so detection runs on a worker pool pulling
//! from a shared cursor. One decoded image lives per worker at a time.
//! An unreadable image is fatal to the run: the first failure stops the
//! pool cooperatively (in-flight images finish) and is returned.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use image::ImageError;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::vision::SymbolDetector;

/// Read a list file: one image path per line, blank lines ignored.
pub fn read_image_list(path: &Path) -> Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Detect transport payloads in `paths` using up to `workers` threads
/// (0 = one per available core). `cap` bounds unique payloads per image,
/// 0 = unlimited. Results come back in path order.
pub fn scan_images(
    paths: &[PathBuf],
    detector: &dyn SymbolDetector,
    cap: usize,
    workers: usize,
) -> Result<Vec<String>> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let workers = effective_workers(workers, paths.len());
    let cursor = AtomicUsize::new(0);
    let failed = AtomicBool::new(false);
    let results: Mutex<Vec<Vec<String>>> = Mutex::new(vec![Vec::new(); paths.len()]);
    let first_err: Mutex<Option<Error>> = Mutex::new(None);

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| loop {
                if failed.load(Ordering::Relaxed) {
                    break;
                }
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                if i >= paths.len() {
                    break;
                }
                match scan_one(&paths[i], detector, cap) {
                    Ok(codes) => {
                        debug!("scan {}: {} payload(s)", paths[i].display(), codes.len());
                        if let Ok(mut slots) = results.lock() {
                            slots[i] = codes;
                        }
                    }
                    Err(e) => {
                        failed.store(true, Ordering::Relaxed);
                        if let Ok(mut slot) = first_err.lock() {
                            slot.get_or_insert(e);
                        }
                        break;
                    }
                }
            });
        }
    });

    let first_err = match first_err.into_inner() {
        Ok(v) => v,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(e) = first_err {
        return Err(e);
    }

    let results = match results.into_inner() {
        Ok(v) => v,
        Err(poisoned) => poisoned.into_inner(),
    };
    let codes: Vec<String> = results.into_iter().flatten().collect();
    info!(
        "scan: {} image(s), {} payload(s) before dedup",
        paths.len(),
        codes.len()
    );
    Ok(codes)
}

fn scan_one(path: &Path, detector: &dyn SymbolDetector, cap: usize) -> Result<Vec<String>> {
    let img = image::open(path).map_err(|e| match e {
        ImageError::IoError(io) => Error::Io(io),
        other => Error::format(format!("read image {}: {other}", path.display())),
    })?;
    detector.detect(&img, cap)
    // img drops here: one decoded image per worker at a time
}

fn effective_workers(requested: usize, jobs: usize) -> usize {
    let cap = if requested > 0 {
        requested
    } else {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    };
    cap.min(jobs).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_count_is_bounded_by_jobs() {
        assert_eq!(effective_workers(8, 3), 3);
        assert_eq!(effective_workers(2, 100), 2);
        assert!(effective_workers(0, 100) >= 1);
        assert_eq!(effective_workers(4, 1), 1);
    }
}
