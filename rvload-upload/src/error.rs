// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload failures.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to read payload {}: {source}", .path.display())]
    PayloadRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("payload {} is empty, nothing to load", .path.display())]
    EmptyPayload { path: PathBuf },

    #[error("failed to open serial port {port} at {baudrate} baud: {source}")]
    SinkOpen {
        port: String,
        baudrate: u32,
        #[source]
        source: serialport::Error,
    },

    #[error(
        "transmission failed at frame {frame} of {total}: {source} \
         (target state unknown, reset it and restart the transfer)"
    )]
    Transmission {
        frame: usize,
        total: usize,
        #[source]
        source: io::Error,
    },
}
