// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload command: load, frame, transmit.

use std::io;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use rvload_common::{write_frames, FramePlan, FrameSink};

use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::payload::Payload;
use crate::transport::Transport;

/// Download the configured image to the target.
pub fn upload(config: &UploadConfig) -> Result<()> {
    let payload = Payload::load(&config.path)?;
    let plan = payload.plan()?;

    println!(
        "Program:  {} ({} bytes, CRC32: 0x{:08x})",
        payload.path().display(),
        payload.len(),
        payload.crc32()
    );
    println!(
        "Framing:  {} frames, {} bytes on wire{}",
        plan.frame_count(),
        plan.wire_len(),
        if plan.has_terminator() {
            " (ends with terminator)"
        } else {
            ""
        }
    );

    if config.dry_run {
        println!("Dry run, {} not opened.", config.serial.port);
        return Ok(());
    }

    println!(
        "Opening serial port {} with baudrate {}",
        config.serial.port, config.serial.baudrate
    );
    let mut transport = Transport::open(&config.serial)?;

    let pb = progress_bar(plan.wire_len() as u64, config.progress)?;
    let written = transmit(&plan, &mut transport, &pb)?;
    pb.finish_and_clear();

    println!(
        "Finished writing data to {} ({} bytes).",
        transport.port_name(),
        written
    );

    if let Some(window) = config.readback {
        let echoed = transport.read_available(window);
        report_readback(&echoed);
    }

    Ok(())
}

/// Write every frame of `plan` to `sink`, advancing `pb` by wire bytes.
///
/// Aborts at the first failed frame without touching the sink again.
pub fn transmit<S>(plan: &FramePlan<'_>, sink: &mut S, pb: &ProgressBar) -> Result<usize, UploadError>
where
    S: FrameSink<Error = io::Error> + ?Sized,
{
    let total = plan.frame_count();

    let result = write_frames(plan, sink, |number, frame| {
        if frame.is_terminator() {
            log::debug!("frame {}/{}: terminator", number, total);
        } else {
            log::debug!("frame {}/{}: {} bytes", number, total, frame.len());
        }
        log::trace!("frame {}: {:02x?}", number, frame.data());
        pb.inc(frame.wire_len() as u64);
    });

    result.map_err(|e| {
        pb.abandon();
        UploadError::Transmission {
            frame: e.frame,
            total,
            source: e.source,
        }
    })
}

fn progress_bar(len: u64, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn report_readback(bytes: &[u8]) {
    if bytes.is_empty() {
        println!("No output from device.");
        return;
    }
    println!("Received {} bytes after transfer:", bytes.len());
    println!("  hex:  {:02x?}", bytes);
    println!("  text: {}", String::from_utf8_lossy(bytes));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink backed by a byte vector that fails on the n-th write.
    struct FlakySink {
        wire: Vec<u8>,
        writes: usize,
        fail_on: Option<usize>,
    }

    impl FlakySink {
        fn new(fail_on: Option<usize>) -> Self {
            Self {
                wire: Vec::new(),
                writes: 0,
                fail_on,
            }
        }
    }

    impl FrameSink for FlakySink {
        type Error = io::Error;

        fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
            self.writes += 1;
            if self.fail_on == Some(self.writes) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "port closed"));
            }
            self.wire.extend_from_slice(frame);
            Ok(())
        }
    }

    #[test]
    fn test_transmit_writes_exact_stream() {
        let payload = [0xAAu8; 255];
        let plan = FramePlan::new(&payload).unwrap();
        let mut sink = FlakySink::new(None);
        let pb = ProgressBar::hidden();

        let written = transmit(&plan, &mut sink, &pb).unwrap();

        assert_eq!(written, 257);
        assert_eq!(sink.writes, 2);
        assert_eq!(sink.wire[0], 0xFF);
        assert_eq!(&sink.wire[1..256], &payload[..]);
        assert_eq!(sink.wire[256], 0x00);
        assert_eq!(pb.position(), 257);
    }

    #[test]
    fn test_transmit_reports_failing_frame() {
        let payload = vec![0x11u8; 1000];
        let plan = FramePlan::new(&payload).unwrap();
        let mut sink = FlakySink::new(Some(3));

        let err = transmit(&plan, &mut sink, &ProgressBar::hidden()).unwrap_err();

        match &err {
            UploadError::Transmission { frame, total, .. } => {
                assert_eq!(*frame, 3);
                assert_eq!(*total, 4);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("failed at frame 3"));
        // Nothing after the failed frame
        assert_eq!(sink.writes, 3);
        assert_eq!(sink.wire.len(), 2 * 256);
    }

    #[test]
    fn test_transmit_short_payload_has_no_terminator() {
        let plan = FramePlan::new(&[0x42]).unwrap();
        let mut sink = FlakySink::new(None);
        transmit(&plan, &mut sink, &ProgressBar::hidden()).unwrap();
        assert_eq!(sink.wire, vec![0x01, 0x42]);
    }

    #[test]
    fn test_dry_run_does_not_open_port() {
        let path = std::env::temp_dir().join(format!("rvload-dry-{}.bin", std::process::id()));
        std::fs::write(&path, [0x13u8; 300]).unwrap();

        let serial = crate::config::SerialConfig::new("/dev/rvload-no-such-port");
        let mut config = UploadConfig::new(serial, &path);
        config.dry_run = true;
        config.progress = false;

        assert!(upload(&config).is_ok());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_file_fails_before_port_open() {
        let path = std::env::temp_dir().join(format!("rvload-empty-{}.bin", std::process::id()));
        std::fs::write(&path, Vec::<u8>::new()).unwrap();

        let serial = crate::config::SerialConfig::new("/dev/rvload-no-such-port");
        let config = UploadConfig::new(serial, &path);

        let err = upload(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::EmptyPayload { .. })
        ));
        std::fs::remove_file(path).ok();
    }
}
