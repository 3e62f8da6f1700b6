// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use rvload_common::DEFAULT_BAUDRATE;

use crate::commands;
use crate::config::{SerialConfig, UploadConfig, DEFAULT_TIMEOUT_MS};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "rvload")]
#[command(about = "Download binary files over UART to a RISC-V core")]
pub struct Cli {
    /// Serial port over which the file should be downloaded (e.g., /dev/ttyUSB0)
    #[arg(value_name = "PORT")]
    pub port: String,

    /// Binary file to download
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Baud rate of the serial connection
    #[arg(short, long, default_value_t = DEFAULT_BAUDRATE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub baudrate: u32,

    /// Serial write timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Collect and print device output for this many milliseconds after the transfer
    #[arg(long, default_value_t = 0)]
    pub readback_ms: u64,

    /// Frame the file and print the plan without opening the port
    #[arg(long)]
    pub dry_run: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Log each frame (-v) or dump frame bytes (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn to_config(&self) -> UploadConfig {
        let serial = SerialConfig::new(self.port.as_str())
            .with_baudrate(self.baudrate)
            .with_timeout(Duration::from_millis(self.timeout_ms));

        let mut config = UploadConfig::new(serial, self.path.as_path());
        config.readback = (self.readback_ms > 0).then(|| Duration::from_millis(self.readback_ms));
        config.dry_run = self.dry_run;
        // Frame logs and the bar would fight over the terminal
        config.progress = !self.quiet && self.verbose == 0;
        config
    }
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config();
    commands::upload(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rvload").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["/dev/ttyUSB0", "prog.bin"]).unwrap();
        let config = cli.to_config();
        assert_eq!(config.serial.port, "/dev/ttyUSB0");
        assert_eq!(config.serial.baudrate, 115_200);
        assert_eq!(config.serial.timeout, Duration::from_secs(1));
        assert_eq!(config.path, PathBuf::from("prog.bin"));
        assert!(config.readback.is_none());
        assert!(!config.dry_run);
        assert!(config.progress);
    }

    #[test]
    fn test_baudrate_short_and_long() {
        assert_eq!(parse(&["p", "f", "-b", "9600"]).unwrap().baudrate, 9600);
        assert_eq!(
            parse(&["p", "f", "--baudrate", "57600"]).unwrap().baudrate,
            57600
        );
    }

    #[test]
    fn test_zero_baudrate_rejected() {
        assert!(parse(&["p", "f", "-b", "0"]).is_err());
    }

    #[test]
    fn test_missing_path_rejected() {
        assert!(parse(&["/dev/ttyUSB0"]).is_err());
    }

    #[test]
    fn test_readback_enabled_when_positive() {
        let config = parse(&["p", "f", "--readback-ms", "500"])
            .unwrap()
            .to_config();
        assert_eq!(config.readback, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_verbose_hides_progress() {
        let cli = parse(&["p", "f", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.to_config().progress);
        assert!(!parse(&["p", "f", "-q"]).unwrap().to_config().progress);
    }
}
