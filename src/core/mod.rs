// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/mod.rs

pub mod config;
pub mod event;
pub mod exception;
pub mod executor;
pub mod persistence;
pub mod query;
pub mod util;

pub use self::exception::{EventFluxError, EventFluxResult};
