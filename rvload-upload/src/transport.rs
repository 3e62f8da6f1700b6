// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Serial transport to the target's UART.

use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use rvload_common::FrameSink;
use serialport::SerialPort;

use crate::config::SerialConfig;
use crate::error::UploadError;

/// Upper bound on a single read while collecting device output.
const READBACK_POLL: Duration = Duration::from_millis(50);

/// UART link to the bootloader. The port closes when this is dropped.
pub struct Transport {
    port: Box<dyn SerialPort>,
}

impl Transport {
    /// Open the port described by `config`.
    pub fn open(config: &SerialConfig) -> Result<Self, UploadError> {
        let port = serialport::new(&config.port, config.baudrate)
            .timeout(config.timeout)
            .open()
            .map_err(|source| UploadError::SinkOpen {
                port: config.port.clone(),
                baudrate: config.baudrate,
                source,
            })?;

        log::debug!(
            "opened {} at {} baud, timeout {:?}",
            config.port,
            config.baudrate,
            config.timeout
        );
        Ok(Self { port })
    }

    /// Get the port name.
    pub fn port_name(&self) -> String {
        self.port.name().unwrap_or_else(|| "?".to_string())
    }

    /// Collect whatever the device sends within `window`.
    ///
    /// Best effort: a read error ends collection early and is only logged.
    pub fn read_available(&mut self, window: Duration) -> Vec<u8> {
        let deadline = Instant::now() + window;
        let old_timeout = self.port.timeout();
        let mut received = Vec::new();
        let mut buf = [0u8; 64];

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            if let Err(e) = self.port.set_timeout(remaining.min(READBACK_POLL)) {
                log::debug!("readback: cannot set timeout: {}", e);
                break;
            }

            match self.port.read(&mut buf) {
                Ok(n) => received.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
                Err(e) => {
                    log::debug!("readback stopped: {}", e);
                    break;
                }
            }
        }

        let _ = self.port.set_timeout(old_timeout);
        received
    }
}

impl FrameSink for Transport {
    type Error = io::Error;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(frame)?;
        self.port.flush()
    }
}
