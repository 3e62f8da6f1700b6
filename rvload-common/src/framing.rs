// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Block segmentation and length-prefixed frame writing.
//!
//! A payload is cut into blocks of `MAX_BLOCK` bytes (the last one may be
//! shorter) and every block goes out as one frame. A block shorter than
//! `MAX_BLOCK` tells the receiver the transfer is over, so a payload whose
//! last block is full gets an extra terminator frame.

#[cfg(feature = "std")]
use alloc::vec::Vec;

use core::slice::Chunks;

use crate::error::{FrameError, WriteError};
use crate::protocol::{Frame, MAX_BLOCK};

// --- Segmentation ---

/// Split `payload` into blocks of at most `MAX_BLOCK` bytes, in order.
pub fn blocks(payload: &[u8]) -> Chunks<'_, u8> {
    payload.chunks(MAX_BLOCK)
}

/// Number of data frames needed for `len` payload bytes.
pub const fn block_count(len: usize) -> usize {
    len.div_ceil(MAX_BLOCK)
}

/// True if a payload of `len` bytes ends on a full block.
pub const fn needs_terminator(len: usize) -> bool {
    len > 0 && len % MAX_BLOCK == 0
}

/// Frame layout of a non-empty payload.
#[derive(Debug, Clone, Copy)]
pub struct FramePlan<'a> {
    payload: &'a [u8],
}

impl<'a> FramePlan<'a> {
    pub fn new(payload: &'a [u8]) -> Result<Self, FrameError> {
        if payload.is_empty() {
            return Err(FrameError::EmptyPayload);
        }
        Ok(Self { payload })
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn block_count(&self) -> usize {
        block_count(self.payload.len())
    }

    pub fn has_terminator(&self) -> bool {
        needs_terminator(self.payload.len())
    }

    /// Data frames plus the terminator, if any.
    pub fn frame_count(&self) -> usize {
        self.block_count() + usize::from(self.has_terminator())
    }

    /// Total bytes put on the wire.
    pub fn wire_len(&self) -> usize {
        self.payload.len() + self.frame_count()
    }

    /// Every frame in wire order.
    pub fn frames(&self) -> Frames<'a> {
        Frames {
            blocks: blocks(self.payload),
            terminator_pending: self.has_terminator(),
        }
    }
}

/// Iterator over the frames of a [`FramePlan`].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    blocks: Chunks<'a, u8>,
    terminator_pending: bool,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(block) = self.blocks.next() {
            return Some(Frame::from_block_unchecked(block));
        }
        if self.terminator_pending {
            self.terminator_pending = false;
            return Some(Frame::terminator());
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.blocks.len() + usize::from(self.terminator_pending);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Frames<'_> {}

// --- Writing ---

/// Byte sink receiving whole frames.
///
/// `write_frame` blocks until the sink accepted every byte of the frame or
/// failed. Frames must reach the wire in call order.
pub trait FrameSink {
    type Error;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

impl<const N: usize> FrameSink for heapless::Vec<u8, N> {
    type Error = FrameError;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(frame)
            .map_err(|_| FrameError::Overflow { capacity: N })
    }
}

#[cfg(feature = "std")]
impl FrameSink for Vec<u8> {
    type Error = core::convert::Infallible;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(frame);
        Ok(())
    }
}

/// Adapts any [`std::io::Write`] into a [`FrameSink`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> FrameSink for IoSink<W> {
    type Error = std::io::Error;

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(frame)?;
        self.0.flush()
    }
}

/// Write every frame of `plan` to `sink`, stopping at the first failure.
///
/// `on_frame` runs after each frame the sink accepted, with the frame's
/// 1-based number. Returns the number of bytes written.
pub fn write_frames<S, F>(
    plan: &FramePlan<'_>,
    sink: &mut S,
    mut on_frame: F,
) -> Result<usize, WriteError<S::Error>>
where
    S: FrameSink + ?Sized,
    F: FnMut(usize, &Frame<'_>),
{
    let mut written = 0;
    for (index, frame) in plan.frames().enumerate() {
        let number = index + 1;
        sink.write_frame(&frame.encode())
            .map_err(|source| WriteError {
                frame: number,
                source,
            })?;
        written += frame.wire_len();
        on_frame(number, &frame);
    }
    Ok(written)
}

/// Frame `payload` into its complete wire stream.
#[cfg(feature = "std")]
pub fn encode_stream(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    let plan = FramePlan::new(payload)?;
    let mut stream = Vec::with_capacity(plan.wire_len());
    match write_frames(&plan, &mut stream, |_, _| {}) {
        Ok(_) => Ok(stream),
        Err(e) => match e.source {},
    }
}

// --- Decoding ---

/// Walk a frame stream the way the receiver does, handing each block to
/// `load`. Stops after the first frame shorter than `MAX_BLOCK`.
fn decode_frames<F>(stream: &[u8], mut load: F) -> Result<(), FrameError>
where
    F: FnMut(&[u8]) -> Result<(), FrameError>,
{
    let mut rest = stream;
    let mut frame = 0;

    loop {
        frame += 1;
        let (&len, tail) = rest.split_first().ok_or(FrameError::MissingTerminator)?;
        let len = usize::from(len);
        if tail.len() < len {
            return Err(FrameError::Truncated {
                frame,
                expected: len,
                available: tail.len(),
            });
        }

        let (block, tail) = tail.split_at(len);
        load(block)?;

        if len < MAX_BLOCK {
            if !tail.is_empty() {
                return Err(FrameError::TrailingBytes(tail.len()));
            }
            return Ok(());
        }
        rest = tail;
    }
}

/// Decode a frame stream into `image`, returning the number of bytes loaded.
pub fn decode_stream_into(stream: &[u8], image: &mut [u8]) -> Result<usize, FrameError> {
    let capacity = image.len();
    let mut loaded = 0;

    decode_frames(stream, |block| {
        let dest = image
            .get_mut(loaded..loaded + block.len())
            .ok_or(FrameError::Overflow { capacity })?;
        dest.copy_from_slice(block);
        loaded += block.len();
        Ok(())
    })?;

    Ok(loaded)
}

/// Decode a frame stream back into the payload it carries.
#[cfg(feature = "std")]
pub fn decode_stream(stream: &[u8]) -> Result<Vec<u8>, FrameError> {
    let mut payload = Vec::with_capacity(stream.len());
    decode_frames(stream, |block| {
        payload.extend_from_slice(block);
        Ok(())
    })?;
    Ok(payload)
}
