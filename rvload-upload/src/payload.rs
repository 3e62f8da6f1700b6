// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Program image loaded from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crc::{Crc, CRC_32_ISO_HDLC};
use rvload_common::{FrameError, FramePlan};

use crate::error::UploadError;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Non-empty image bytes, read once and never modified.
#[derive(Debug)]
pub struct Payload {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl Payload {
    pub fn load(path: &Path) -> Result<Self, UploadError> {
        let bytes = fs::read(path).map_err(|source| UploadError::PayloadRead {
            path: path.to_path_buf(),
            source,
        })?;

        if bytes.is_empty() {
            return Err(UploadError::EmptyPayload {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn crc32(&self) -> u32 {
        CRC32.checksum(&self.bytes)
    }

    pub fn plan(&self) -> Result<FramePlan<'_>, UploadError> {
        // FramePlan::new only rejects empty input
        FramePlan::new(self.bytes()).map_err(|_: FrameError| UploadError::EmptyPayload {
            path: self.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rvload-payload-{}-{}.bin",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_reads_whole_file() {
        let path = fixture("whole", &[0x13, 0x00, 0x00, 0x00]);
        let payload = Payload::load(&path).unwrap();
        assert_eq!(payload.bytes(), &[0x13, 0x00, 0x00, 0x00]);
        assert_eq!(payload.len(), 4);
        assert_eq!(payload.path(), path.as_path());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_payload_read_error() {
        let path = std::env::temp_dir().join("rvload-payload-does-not-exist.bin");
        let err = Payload::load(&path).unwrap_err();
        assert!(matches!(err, UploadError::PayloadRead { .. }));
        assert!(err.to_string().contains("failed to read payload"));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let path = fixture("empty", &[]);
        let err = Payload::load(&path).unwrap_err();
        assert!(matches!(err, UploadError::EmptyPayload { .. }));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_crc32_matches_reference() {
        let path = fixture("crc", b"123456789");
        let payload = Payload::load(&path).unwrap();
        // CRC-32/ISO-HDLC check value
        assert_eq!(payload.crc32(), 0xCBF4_3926);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_plan_covers_payload() {
        let path = fixture("plan", &[0xAA; 255]);
        let payload = Payload::load(&path).unwrap();
        let plan = payload.plan().unwrap();
        assert_eq!(plan.frame_count(), 2);
        assert!(plan.has_terminator());
        fs::remove_file(path).ok();
    }
}
