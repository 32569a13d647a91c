//! vision/qr — QR backend for the symbol capabilities.
//!
//! Rendering maps the splitter's robustness level onto the QR error
//! correction level; the budgets in `split` are sized so a full frame's
//! transport string fits a version-40 symbol at the matching EC level.
//!
//! Detection runs a small search over image adjustments and orientations,
//! since photographed pages arrive with varying exposure and rotation.
//! One adjusted/oriented variant is alive at a time.

use image::{DynamicImage, GrayImage, Luma};
use log::debug;
use qrcode::{EcLevel, QrCode};

use super::{SymbolDetector, SymbolEncoder};
use crate::error::{Error, Result};
use crate::split::RobustnessLevel;

fn ec_level(level: RobustnessLevel) -> EcLevel {
    match level {
        RobustnessLevel::High => EcLevel::H,
        RobustnessLevel::Quartile => EcLevel::Q,
        RobustnessLevel::Medium => EcLevel::M,
        RobustnessLevel::Low => EcLevel::L,
    }
}

/// Renders transport payloads as QR symbols via the `qrcode` crate.
#[derive(Debug, Clone, Copy)]
pub struct QrSymbolEncoder {
    level: RobustnessLevel,
    module_px: u32,
}

impl QrSymbolEncoder {
    pub fn new(level: RobustnessLevel, module_px: u32) -> Self {
        QrSymbolEncoder {
            level,
            module_px: module_px.max(1),
        }
    }
}

impl SymbolEncoder for QrSymbolEncoder {
    fn render(&self, payload: &str) -> Result<GrayImage> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), ec_level(self.level))
            .map_err(|e| Error::format(format!("symbol render failed: {e}")))?;
        Ok(code
            .render::<Luma<u8>>()
            .module_dimensions(self.module_px, self.module_px)
            .build())
    }
}

// Adjustment steps tried per image, identity first.
const ADJUSTMENTS: usize = 4;
// Quarter turns tried per adjustment.
const ORIENTATIONS: u32 = 4;

/// Detects QR payloads via `rqrr` across exposure/orientation variants.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrSymbolDetector;

impl SymbolDetector for QrSymbolDetector {
    fn detect(&self, image: &DynamicImage, cap: usize) -> Result<Vec<String>> {
        let mut found: Vec<String> = Vec::new();
        'search: for step in 0..ADJUSTMENTS {
            let adjusted = adjust(image, step);
            for quarter in 0..ORIENTATIONS {
                if cap > 0 && found.len() >= cap {
                    break 'search;
                }
                scan_variant(oriented(&adjusted, quarter), cap, &mut found);
            }
        }
        Ok(found)
    }
}

fn adjust(image: &DynamicImage, step: usize) -> DynamicImage {
    match step {
        1 => image.adjust_contrast(40.0),
        2 => image.brighten(64),
        3 => image.adjust_contrast(-40.0),
        _ => image.clone(),
    }
}

fn oriented(image: &DynamicImage, quarter_turns: u32) -> GrayImage {
    match quarter_turns % 4 {
        1 => image.rotate90().to_luma8(),
        2 => image.rotate180().to_luma8(),
        3 => image.rotate270().to_luma8(),
        _ => image.to_luma8(),
    }
}

fn scan_variant(gray: GrayImage, cap: usize, found: &mut Vec<String>) {
    let (w, h) = gray.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
        gray.get_pixel(x as u32, y as u32).0[0]
    });
    for grid in prepared.detect_grids() {
        if cap > 0 && found.len() >= cap {
            return;
        }
        match grid.decode() {
            Ok((_, content)) => {
                if !found.contains(&content) {
                    found.push(content);
                }
            }
            Err(e) => debug!("symbol decode attempt failed: {e}"),
        }
    }
}
