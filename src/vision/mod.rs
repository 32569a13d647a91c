//! vision — capability boundaries for symbol rendering, detection, and
//! page compositing.
//!
//! The splitter, reassembler, and layout planner reach raster and barcode
//! machinery only through these traits, so the core stays testable with
//! in-memory fakes and the backends stay swappable.

pub mod canvas;
pub mod qr;

pub use canvas::ImageCanvas;
pub use qr::{QrSymbolDetector, QrSymbolEncoder};

use std::path::Path;

use image::{DynamicImage, GrayImage};

use crate::error::Result;

/// Renders one transport payload into a scannable symbol image.
pub trait SymbolEncoder {
    fn render(&self, payload: &str) -> Result<GrayImage>;
}

/// Extracts transport payloads from a photographed or scanned image.
///
/// `cap > 0` bounds the number of unique payloads wanted from this image;
/// it is a cooperative early-exit threshold — an in-flight detection
/// attempt completes, subsequent attempts are skipped.
pub trait SymbolDetector: Sync {
    fn detect(&self, image: &DynamicImage, cap: usize) -> Result<Vec<String>>;
}

/// Raster page compositor.
///
/// At most one page is open at a time. `finish_page` releases the page on
/// success and failure alike; an abandoned page is released by the next
/// `begin_page` or by drop.
pub trait Canvas {
    fn begin_page(&mut self, width: u32, height: u32) -> Result<()>;
    fn place(&mut self, symbol: &GrayImage, x: u32, y: u32) -> Result<()>;
    fn finish_page(&mut self, path: &Path) -> Result<()>;
}
