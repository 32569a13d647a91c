use anyhow::Result;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod cmd_decode;
mod cmd_encode;

fn init_logger() {
    // Level comes from RUST_LOG, default info.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Encode {
            input,
            level,
            grid,
            out_dir,
        } => cmd_encode::exec(input, level, grid, out_dir),

        cli::Cmd::Decode {
            images,
            codes,
            out_dir,
            cap,
            workers,
            json,
        } => cmd_decode::exec(images, codes, out_dir, cap, workers, json),
    }
}
