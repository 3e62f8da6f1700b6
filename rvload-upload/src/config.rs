// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload configuration.

use std::path::PathBuf;
use std::time::Duration;

use rvload_common::DEFAULT_BAUDRATE;

/// Default timeout for serial operations in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Serial link settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub port: String,
    pub baudrate: u32,
    pub timeout: Duration,
}

impl SerialConfig {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baudrate: DEFAULT_BAUDRATE,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_baudrate(mut self, baudrate: u32) -> Self {
        self.baudrate = baudrate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Everything one upload needs.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub serial: SerialConfig,
    pub path: PathBuf,
    /// How long to collect device output after the transfer. `None` skips it.
    pub readback: Option<Duration>,
    /// Frame the payload and report, without opening the port.
    pub dry_run: bool,
    pub progress: bool,
}

impl UploadConfig {
    pub fn new(serial: SerialConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            serial,
            path: path.into(),
            readback: None,
            dry_run: false,
            progress: true,
        }
    }
}
