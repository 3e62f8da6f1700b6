// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Program image downloader for RISC-V UART bootloaders.
//!
//! Usage:
//!   rvload /dev/ttyUSB0 program.bin
//!   rvload /dev/ttyUSB0 program.bin --baudrate 57600 --readback-ms 500
//!   rvload /dev/ttyUSB0 program.bin --dry-run -v

mod cli;
mod commands;
mod config;
mod error;
mod payload;
mod transport;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);
    cli::run(args)
}

/// `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
