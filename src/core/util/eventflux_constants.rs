// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/util/eventflux_constants.rs

//! Constants shared by the event model and the expression executors.

// Position indexes for attribute arrays used by `StreamEvent`/`StateEvent`.
pub const BEFORE_WINDOW_DATA_INDEX: usize = 0;
pub const ON_AFTER_WINDOW_DATA_INDEX: usize = 1;
pub const OUTPUT_DATA_INDEX: usize = 2;
pub const STATE_OUTPUT_DATA_INDEX: usize = 3;

pub const STREAM_EVENT_CHAIN_INDEX: usize = 0;
pub const STREAM_EVENT_INDEX_IN_CHAIN: usize = 1;
pub const STREAM_ATTRIBUTE_TYPE_INDEX: usize = 2;
pub const STREAM_ATTRIBUTE_INDEX_IN_TYPE: usize = 3;
