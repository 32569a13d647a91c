use std::path::{Path, PathBuf};

use image::GrayImage;

use paperframe::error::Result;
use paperframe::layout::{compose_pages, plan_pages, PageGrid};
use paperframe::vision::Canvas;

/// Records compositing calls instead of touching any raster backend.
#[derive(Default)]
struct FakeCanvas {
    open: bool,
    pages: Vec<FakePage>,
}

struct FakePage {
    width: u32,
    height: u32,
    placements: Vec<(u32, u32)>,
    path: PathBuf,
}

impl Canvas for FakeCanvas {
    fn begin_page(&mut self, width: u32, height: u32) -> Result<()> {
        assert!(!self.open, "previous page was never finished");
        self.open = true;
        self.pages.push(FakePage {
            width,
            height,
            placements: Vec::new(),
            path: PathBuf::new(),
        });
        Ok(())
    }

    fn place(&mut self, _symbol: &GrayImage, x: u32, y: u32) -> Result<()> {
        assert!(self.open, "place without an open page");
        if let Some(page) = self.pages.last_mut() {
            page.placements.push((x, y));
        }
        Ok(())
    }

    fn finish_page(&mut self, path: &Path) -> Result<()> {
        assert!(self.open, "finish without an open page");
        self.open = false;
        if let Some(page) = self.pages.last_mut() {
            page.path = path.to_path_buf();
        }
        Ok(())
    }
}

fn symbols(n: usize) -> Vec<GrayImage> {
    (0..n).map(|_| GrayImage::new(10, 10)).collect()
}

#[test]
fn page_count_law_holds_across_grids() -> anyhow::Result<()> {
    for (n, w, h) in [
        (1usize, 1u32, 1u32),
        (5, 1, 1),
        (11, 3, 4),
        (12, 3, 4),
        (13, 3, 4),
        (30, 2, 3),
        (7, 5, 5),
    ] {
        let grid = PageGrid::new(w, h)?;
        let mut canvas = FakeCanvas::default();
        let imgs = symbols(n);
        let pages = compose_pages(&imgs, grid, 4, &mut canvas, |p, total| {
            PathBuf::from(format!("page-{p}-of-{total}.png"))
        })?;

        let cells = (w * h) as usize;
        assert_eq!(pages, n.div_ceil(cells), "n={n} grid={w}x{h}");
        assert_eq!(canvas.pages.len(), pages);
        assert!(!canvas.open);

        // Membership: placements across pages add up to the input count,
        // with only the final page partial.
        let placed: usize = canvas.pages.iter().map(|p| p.placements.len()).sum();
        assert_eq!(placed, n);
        for page in &canvas.pages[..pages - 1] {
            assert_eq!(page.placements.len(), cells);
        }
        for (p, page) in canvas.pages.iter().enumerate() {
            assert_eq!(page.path, PathBuf::from(format!("page-{p}-of-{pages}.png")));
        }
    }
    Ok(())
}

#[test]
fn partial_page_is_sized_to_its_symbols() -> anyhow::Result<()> {
    let grid = PageGrid::new(3, 4)?;
    let margin = 4u32;
    let mut canvas = FakeCanvas::default();
    // 14 symbols: one full 3x4 page, then a partial page of 2 (one row).
    compose_pages(&symbols(14), grid, margin, &mut canvas, |p, _| {
        PathBuf::from(format!("{p}.png"))
    })?;

    assert_eq!(canvas.pages.len(), 2);
    let full = &canvas.pages[0];
    assert_eq!(full.width, margin + 3 * (10 + margin));
    assert_eq!(full.height, margin + 4 * (10 + margin));

    let partial = &canvas.pages[1];
    assert_eq!(partial.placements.len(), 2);
    assert_eq!(partial.width, margin + 2 * (10 + margin));
    assert_eq!(partial.height, margin + (10 + margin));
    // Both symbols sit on the first row, left to right.
    assert_eq!(partial.placements, vec![(4, 4), (18, 4)]);
    Ok(())
}

#[test]
fn planning_is_pure_and_order_preserving() {
    let grid = PageGrid { width: 4, height: 2 };
    let pages = plan_pages(19, grid);
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0], 0..8);
    assert_eq!(pages[1], 8..16);
    assert_eq!(pages[2], 16..19);
}

#[test]
fn zero_symbols_make_zero_pages() -> anyhow::Result<()> {
    let mut canvas = FakeCanvas::default();
    let pages = compose_pages(
        &[],
        PageGrid::new(3, 4)?,
        4,
        &mut canvas,
        |_, _| PathBuf::from("unused.png"),
    )?;
    assert_eq!(pages, 0);
    assert!(canvas.pages.is_empty());
    Ok(())
}
