// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Framing errors.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Nothing to send; the receiver would jump into unloaded memory.
    EmptyPayload,
    /// A length byte promised more bytes than the stream holds.
    Truncated {
        frame: usize,
        expected: usize,
        available: usize,
    },
    /// Bytes left over after the frame that ends the transfer.
    TrailingBytes(usize),
    /// Stream ended on a full block without a terminator.
    MissingTerminator,
    /// Image does not fit in the destination buffer.
    Overflow { capacity: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::EmptyPayload => write!(f, "payload is empty"),
            FrameError::Truncated {
                frame,
                expected,
                available,
            } => write!(
                f,
                "frame {} truncated: expected {} bytes, {} available",
                frame, expected, available
            ),
            FrameError::TrailingBytes(n) => {
                write!(f, "{} bytes after end of transfer", n)
            }
            FrameError::MissingTerminator => {
                write!(f, "stream ended on a full block without terminator")
            }
            FrameError::Overflow { capacity } => {
                write!(f, "image exceeds {} byte buffer", capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// A sink rejected a frame. Frames before `frame` were written in full.
#[derive(Debug)]
pub struct WriteError<E> {
    /// 1-based number of the frame that failed.
    pub frame: usize,
    pub source: E,
}

impl<E: fmt::Display> fmt::Display for WriteError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed at frame {}: {}", self.frame, self.source)
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for WriteError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
