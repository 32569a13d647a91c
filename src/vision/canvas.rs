//! vision/canvas — page compositor backed by the `image` crate.

use std::path::Path;

use image::{imageops, GrayImage, ImageError, Luma};
use log::debug;

use super::Canvas;
use crate::error::{Error, Result};

const PAGE_BACKGROUND: Luma<u8> = Luma([0xFF]);

/// White-background grayscale page compositor writing PNG files.
#[derive(Debug, Default)]
pub struct ImageCanvas {
    page: Option<GrayImage>,
}

impl ImageCanvas {
    pub fn new() -> Self {
        ImageCanvas::default()
    }
}

impl Canvas for ImageCanvas {
    fn begin_page(&mut self, width: u32, height: u32) -> Result<()> {
        // Replacing an abandoned page releases it here.
        self.page = Some(GrayImage::from_pixel(width, height, PAGE_BACKGROUND));
        Ok(())
    }

    fn place(&mut self, symbol: &GrayImage, x: u32, y: u32) -> Result<()> {
        let page = self
            .page
            .as_mut()
            .ok_or_else(|| Error::format("place called with no open page"))?;
        imageops::replace(page, symbol, i64::from(x), i64::from(y));
        Ok(())
    }

    fn finish_page(&mut self, path: &Path) -> Result<()> {
        let page = self
            .page
            .take()
            .ok_or_else(|| Error::format("finish_page called with no open page"))?;
        page.save(path).map_err(|e| match e {
            ImageError::IoError(io) => Error::Io(io),
            other => Error::format(format!("write page {}: {other}", path.display())),
        })?;
        debug!("page written: {}", path.display());
        Ok(())
    }
}
