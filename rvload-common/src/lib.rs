// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Wire protocol for loading program images into a RISC-V UART bootloader.
//!
//! This crate supports both `no_std` and `std` environments:
//! - Default: `no_std`, frames are built in fixed-capacity buffers
//! - `std` feature: `Vec`-returning helpers and a `std::io::Write` sink adapter

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate alloc;

pub mod error;
pub mod framing;
pub mod protocol;

// Re-export commonly used types
pub use error::{FrameError, WriteError};
pub use framing::{
    block_count, blocks, decode_stream_into, needs_terminator, write_frames, FramePlan,
    FrameSink, Frames,
};
pub use protocol::{Frame, FrameBuf, DEFAULT_BAUDRATE, FRAME_CAPACITY, MAX_BLOCK, TERMINATOR};

#[cfg(feature = "std")]
pub use framing::{decode_stream, encode_stream, IoSink};
