use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use paperframe::config::PaperConfig;
use paperframe::frame;
use paperframe::layout::{self, PageGrid};
use paperframe::naming;
use paperframe::split::{self, RobustnessLevel};
use paperframe::transport::{Radix32, TextTranscoder};
use paperframe::vision::{ImageCanvas, QrSymbolEncoder, SymbolEncoder};

pub fn exec(input: PathBuf, level: RobustnessLevel, grid: PageGrid, out_dir: PathBuf) -> Result<()> {
    let cfg = PaperConfig::default()
        .with_level(level)
        .with_grid(grid)
        .with_out_dir(out_dir);

    let data = fs::read(&input).with_context(|| format!("read {}", input.display()))?;
    let file_name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("input {} has no file name", input.display()))?;

    let frames = split::split(&data, &file_name, cfg.level)?;
    let count = frames.len();
    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("create output dir {}", cfg.out_dir.display()))?;

    let stem = naming::source_stem(&input);
    let transcoder = Radix32;
    let encoder = QrSymbolEncoder::new(cfg.level, cfg.module_px);
    let mut canvas = ImageCanvas::new();

    // Render page by page so at most one page of symbols is alive.
    let plan = layout::plan_pages(count, cfg.grid);
    let total_pages = plan.len();
    for (page, members) in plan.into_iter().enumerate() {
        let mut symbols = Vec::with_capacity(members.len());
        for idx in members {
            let f = &frames[idx];
            let payload = transcoder.encode_text(&frame::encode(f));
            let symbol = encoder.render(&payload)?;
            let path = cfg.out_dir.join(naming::symbol_file(&stem, idx, count));
            symbol
                .save(&path)
                .with_context(|| format!("write {}", path.display()))?;
            symbols.push(symbol);
        }
        let path = cfg.out_dir.join(naming::page_file(&stem, page, total_pages));
        layout::compose_page(&symbols, cfg.grid, cfg.page_margin, &mut canvas, path)?;
    }

    info!(
        "encode '{}': {} B -> {} frame(s) at level {}, {} page(s)",
        file_name,
        data.len(),
        count,
        cfg.level,
        total_pages
    );
    println!(
        "OK: {} frame(s), {} page(s) -> {}",
        count,
        total_pages,
        cfg.out_dir.display()
    );
    Ok(())
}
