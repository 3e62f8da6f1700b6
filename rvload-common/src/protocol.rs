// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Wire-level constants and the frame type.
//!
//! ```text
//! Frame      := LengthByte Payload
//! LengthByte := one byte, value 1..255
//! Terminator := one byte, value 0
//! Stream     := Frame* [Terminator]   -- Terminator iff last LengthByte == 255
//! ```
//!
//! The receiver keeps reading frames while the length byte is `MAX_BLOCK`
//! and jumps to the loaded image after the first shorter one.

// --- Protocol constants ---

/// Largest number of payload bytes carried by one frame.
pub const MAX_BLOCK: usize = 255;

/// Length byte plus a full block.
pub const FRAME_CAPACITY: usize = MAX_BLOCK + 1;

/// Length byte of the terminator frame.
pub const TERMINATOR: u8 = 0;

/// Baud rate the reference bootloader's UART is configured for.
pub const DEFAULT_BAUDRATE: u32 = 115_200;

// Length bytes must fit in a u8
const _: () = assert!(MAX_BLOCK <= u8::MAX as usize);

/// One encoded frame, ready to be handed to a sink in a single write.
pub type FrameBuf = heapless::Vec<u8, FRAME_CAPACITY>;

/// A length-prefixed unit on the wire.
///
/// Holds a block of `1..=MAX_BLOCK` payload bytes, or nothing for the
/// terminator frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    data: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Frame carrying `block`. Returns `None` if the block is empty or
    /// longer than `MAX_BLOCK`.
    pub fn block(data: &'a [u8]) -> Option<Self> {
        if data.is_empty() || data.len() > MAX_BLOCK {
            return None;
        }
        Some(Self { data })
    }

    /// The zero-length frame that closes a stream ending on a full block.
    pub const fn terminator() -> Self {
        Self { data: &[] }
    }

    pub(crate) fn from_block_unchecked(data: &'a [u8]) -> Self {
        debug_assert!(!data.is_empty() && data.len() <= MAX_BLOCK);
        Self { data }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_terminator(&self) -> bool {
        self.data.is_empty()
    }

    /// Alias of [`Frame::is_terminator`], since a terminator carries no data.
    pub fn is_empty(&self) -> bool {
        self.is_terminator()
    }

    pub fn length_byte(&self) -> u8 {
        // Bounded by MAX_BLOCK at construction
        self.data.len() as u8
    }

    /// Bytes this frame occupies on the wire.
    pub fn wire_len(&self) -> usize {
        1 + self.data.len()
    }

    /// True if the receiver stops reading after this frame.
    pub fn ends_transfer(&self) -> bool {
        self.data.len() < MAX_BLOCK
    }

    /// Length byte followed by the block bytes.
    pub fn encode(&self) -> FrameBuf {
        let mut buf = FrameBuf::new();
        // Capacity covers the largest frame, neither call can fail
        let _ = buf.push(self.length_byte());
        let _ = buf.extend_from_slice(self.data);
        buf
    }
}
