use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use paperframe::collect::Collector;
use paperframe::config::PaperConfig;
use paperframe::error::Error;
use paperframe::naming;
use paperframe::reassemble;
use paperframe::scan;
use paperframe::transport::{code_prefix, Radix32};
use paperframe::vision::QrSymbolDetector;

#[derive(Serialize)]
struct Report {
    recovered: Vec<RecoveredEntry>,
    failed: Vec<FailedEntry>,
    dropped_frames: usize,
}

#[derive(Serialize)]
struct RecoveredEntry {
    file: String,
    bytes: usize,
    crc32: String,
    path: String,
}

#[derive(Serialize)]
struct FailedEntry {
    file: String,
    error: String,
}

pub fn exec(
    images: Option<PathBuf>,
    codes: Option<PathBuf>,
    out_dir: PathBuf,
    cap: usize,
    workers: usize,
    json: bool,
) -> Result<()> {
    if images.is_none() && codes.is_none() {
        bail!("nothing to decode: pass --images and/or --codes");
    }
    let cfg = PaperConfig::default()
        .with_detect_cap(cap)
        .with_workers(workers)
        .with_out_dir(out_dir);

    let transcoder = Radix32;
    let mut collector = Collector::new(code_prefix(&transcoder));

    if let Some(list) = images {
        let paths = scan::read_image_list(&list)
            .with_context(|| format!("read image list {}", list.display()))?;
        let detector = QrSymbolDetector;
        let scanned = scan::scan_images(&paths, &detector, cfg.detect_cap, cfg.workers)?;
        for code in scanned {
            collector.add(code);
        }
    }
    if let Some(path) = codes {
        collector
            .add_codes_file(&path)
            .with_context(|| format!("read codes file {}", path.display()))?;
    }
    if collector.is_empty() {
        bail!("no candidate frames collected");
    }
    info!("collected {} unique candidate(s)", collector.len());

    let outcome = reassemble::reassemble(&collector.into_codes(), &transcoder);

    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("create output dir {}", cfg.out_dir.display()))?;

    let mut report = Report {
        recovered: Vec::new(),
        failed: Vec::new(),
        dropped_frames: outcome.dropped,
    };
    for file in &outcome.files {
        if file.verified {
            let path = cfg.out_dir.join(naming::decoded_file(&file.file_name));
            fs::write(&path, &file.bytes).with_context(|| format!("write {}", path.display()))?;
            info!(
                "recovered '{}' -> {} ({} B, crc32 {:#010x})",
                file.file_name,
                path.display(),
                file.bytes.len(),
                file.checksum
            );
            report.recovered.push(RecoveredEntry {
                file: file.file_name.clone(),
                bytes: file.bytes.len(),
                crc32: format!("{:#010x}", file.checksum),
                path: path.display().to_string(),
            });
        } else {
            // Corrupted reconstructions are reported, never persisted.
            let e = Error::Corruption {
                file_name: file.file_name.clone(),
                expected: file.checksum,
                actual: file.actual_checksum,
            };
            warn!("{e}");
            report.failed.push(FailedEntry {
                file: file.file_name.clone(),
                error: e.to_string(),
            });
        }
    }
    for f in &outcome.failures {
        warn!("{}", f.error);
        report.failed.push(FailedEntry {
            file: f.file_name.clone(),
            error: f.error.to_string(),
        });
    }

    let failures = report.failed.len();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "recovered {} file(s), {} failure(s), {} dropped frame(s)",
            report.recovered.len(),
            failures,
            outcome.dropped
        );
    }

    if failures > 0 {
        bail!("{failures} group(s) failed; see log for details");
    }
    Ok(())
}
