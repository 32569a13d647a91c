//! layout — fixed-grid page planning for rendered symbols.
//!
//! Pure planning (page count, membership, slot coordinates) is separated
//! from raster composition so the page-count law is testable without an
//! image backend. Placement is row-major: left-to-right, top-down.

use std::ops::Range;
use std::path::PathBuf;

use image::GrayImage;

use crate::error::{Error, Result};
use crate::vision::Canvas;

/// Page grid dimensions in symbol cells, both >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGrid {
    pub width: u32,
    pub height: u32,
}

impl PageGrid {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::format(format!(
                "grid dimensions must be >= 1, got {width}x{height}"
            )));
        }
        Ok(PageGrid { width, height })
    }

    /// Symbols per full page.
    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for PageGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for PageGrid {
    type Err = Error;

    /// Parse `WxH`, e.g. `3x4`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::format(format!("grid must be WxH with both >= 1, got '{s}'"));
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(bad)?;
        let width = w.trim().parse::<u32>().map_err(|_| bad())?;
        let height = h.trim().parse::<u32>().map_err(|_| bad())?;
        PageGrid::new(width, height)
    }
}

/// Page membership for `n` symbols: contiguous ranges in input order,
/// `ceil(n / cells)` pages total.
pub fn plan_pages(n: usize, grid: PageGrid) -> Vec<Range<usize>> {
    let per = grid.cells();
    let mut pages = Vec::with_capacity(n.div_ceil(per));
    let mut start = 0;
    while start < n {
        let end = (start + per).min(n);
        pages.push(start..end);
        start = end;
    }
    pages
}

/// Pixel origin of slot `slot` within a page.
pub fn slot_origin(slot: usize, grid: PageGrid, cell_w: u32, cell_h: u32, margin: u32) -> (u32, u32) {
    let col = (slot as u32) % grid.width;
    let row = (slot as u32) / grid.width;
    (margin + col * (cell_w + margin), margin + row * (cell_h + margin))
}

/// Compose one page from its member symbols and write it via `canvas`.
///
/// A partial page is sized to only the symbols it contains.
pub fn compose_page(
    symbols: &[GrayImage],
    grid: PageGrid,
    margin: u32,
    canvas: &mut dyn Canvas,
    path: PathBuf,
) -> Result<()> {
    if symbols.is_empty() || symbols.len() > grid.cells() {
        return Err(Error::format(format!(
            "page must hold 1..={} symbol(s), got {}",
            grid.cells(),
            symbols.len()
        )));
    }
    let cell_w = symbols.iter().map(|s| s.width()).max().unwrap_or(0);
    let cell_h = symbols.iter().map(|s| s.height()).max().unwrap_or(0);
    let cols = symbols.len().min(grid.width as usize) as u32;
    let rows = symbols.len().div_ceil(grid.width as usize) as u32;

    canvas.begin_page(
        margin + cols * (cell_w + margin),
        margin + rows * (cell_h + margin),
    )?;
    for (slot, symbol) in symbols.iter().enumerate() {
        let (x, y) = slot_origin(slot, grid, cell_w, cell_h, margin);
        canvas.place(symbol, x, y)?;
    }
    canvas.finish_page(&path)
}

/// Compose every page for `symbols`; `page_path` maps
/// `(page_index, total_pages)` to the output file. Returns the page count.
pub fn compose_pages<F>(
    symbols: &[GrayImage],
    grid: PageGrid,
    margin: u32,
    canvas: &mut dyn Canvas,
    mut page_path: F,
) -> Result<usize>
where
    F: FnMut(usize, usize) -> PathBuf,
{
    let pages = plan_pages(symbols.len(), grid);
    let total = pages.len();
    for (page, members) in pages.into_iter().enumerate() {
        compose_page(
            &symbols[members],
            grid,
            margin,
            canvas,
            page_path(page, total),
        )?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_law() {
        let grid = PageGrid { width: 3, height: 4 };
        for n in [0usize, 1, 11, 12, 13, 24, 25] {
            let pages = plan_pages(n, grid);
            assert_eq!(pages.len(), n.div_ceil(12), "n = {n}");
            let flattened: Vec<usize> = pages.into_iter().flatten().collect();
            assert_eq!(flattened, (0..n).collect::<Vec<_>>(), "n = {n}");
        }
    }

    #[test]
    fn slots_walk_rows_left_to_right() {
        let grid = PageGrid { width: 2, height: 2 };
        assert_eq!(slot_origin(0, grid, 10, 10, 1), (1, 1));
        assert_eq!(slot_origin(1, grid, 10, 10, 1), (12, 1));
        assert_eq!(slot_origin(2, grid, 10, 10, 1), (1, 12));
        assert_eq!(slot_origin(3, grid, 10, 10, 1), (12, 12));
    }

    #[test]
    fn grid_parsing() {
        assert_eq!("3x4".parse::<PageGrid>().unwrap(), PageGrid { width: 3, height: 4 });
        assert_eq!("1X1".parse::<PageGrid>().unwrap(), PageGrid { width: 1, height: 1 });
        assert!("0x4".parse::<PageGrid>().is_err());
        assert!("3".parse::<PageGrid>().is_err());
        assert!("axb".parse::<PageGrid>().is_err());
    }
}
