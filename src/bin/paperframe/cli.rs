use clap::{Parser, Subcommand};
use std::path::PathBuf;

use paperframe::layout::PageGrid;
use paperframe::split::RobustnessLevel;

/// CLI for paperframe
#[derive(Parser, Debug)]
#[command(name = "paperframe", version, about = "Files <-> printable QR frame pages")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Split a file into QR symbols and page composites
    Encode {
        /// Source file
        #[arg(long)]
        input: PathBuf,
        /// Robustness level: high|quartile|medium|low (strongest first)
        #[arg(long, default_value = "high")]
        level: RobustnessLevel,
        /// Page grid as WxH symbols, e.g. 3x4
        #[arg(long, default_value = "3x4")]
        grid: PageGrid,
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Recover files from scanned images and/or a codes list
    ///
    /// At least one of --images / --codes is required. Nothing is written
    /// for a group that is incomplete, conflicting, or fails its checksum.
    Decode {
        /// Newline-separated list of image paths to scan
        #[arg(long)]
        images: Option<PathBuf>,
        /// Newline-separated transport strings (one per line)
        #[arg(long)]
        codes: Option<PathBuf>,
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Max unique payloads per image before early exit (0 = unlimited)
        #[arg(long, default_value_t = 0)]
        cap: usize,
        /// Detection worker threads (0 = one per core)
        #[arg(long, default_value_t = 0)]
        workers: usize,
        /// JSON report on stdout
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Cli as Parser>::parse()
    }
}
