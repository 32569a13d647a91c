//! Run configuration for paperframe.
//!
//! One explicit value, constructed once by the caller (the CLI builds it
//! from parsed arguments) and threaded through the split/scan/layout entry
//! points. Nothing in the library reads global or environment state.

use std::path::PathBuf;

use crate::layout::PageGrid;
use crate::split::RobustnessLevel;

/// Configuration for one encode or decode run.
#[derive(Debug, Clone)]
pub struct PaperConfig {
    /// Symbol robustness level (capacity budget). Default: strongest.
    pub level: RobustnessLevel,
    /// Page grid in symbol cells.
    pub grid: PageGrid,
    /// Max unique payloads per scanned image, 0 = unlimited.
    pub detect_cap: usize,
    /// Detection worker threads, 0 = one per available core.
    pub workers: usize,
    /// Output directory for symbols, pages, and decoded files.
    pub out_dir: PathBuf,
    /// Pixel margin around and between placed symbols on a page.
    pub page_margin: u32,
    /// Pixels per QR module when rendering.
    pub module_px: u32,
}

impl Default for PaperConfig {
    fn default() -> Self {
        PaperConfig {
            level: RobustnessLevel::High,
            grid: PageGrid {
                width: 3,
                height: 4,
            },
            detect_cap: 0,
            workers: 0,
            out_dir: PathBuf::from("."),
            page_margin: 16,
            module_px: 4,
        }
    }
}

impl PaperConfig {
    pub fn with_level(mut self, level: RobustnessLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_grid(mut self, grid: PageGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_detect_cap(mut self, cap: usize) -> Self {
        self.detect_cap = cap;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn with_page_margin(mut self, margin: u32) -> Self {
        self.page_margin = margin;
        self
    }

    pub fn with_module_px(mut self, px: u32) -> Self {
        self.module_px = px;
        self
    }
}
