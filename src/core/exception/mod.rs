// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/exception/mod.rs

//! Error types surfaced by the window core.
//!
//! Construction problems are reported as [`EventFluxError`] and are fatal to the
//! operator being built. State capture and restore problems use
//! [`StateError`](crate::core::persistence::StateError) and are wrapped here
//! when they cross into query-compilation code.

use crate::core::persistence::state_holder::StateError;
use crate::query_api::definition::attribute::Type as ApiAttributeType;

#[derive(Debug, thiserror::Error)]
pub enum EventFluxError {
    #[error(
        "{window} window should only have {expected} parameters ({signature}), but found {found} input attributes"
    )]
    InvalidParameterCount {
        window: String,
        signature: String,
        expected: usize,
        found: usize,
    },

    #[error("{window} window's parameter '{parameter}' should be {expected}, but found {found}")]
    InvalidParameterType {
        window: String,
        parameter: String,
        expected: String,
        found: String,
    },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    State(#[from] StateError),
}

impl EventFluxError {
    pub fn invalid_parameter_type(
        window: &str,
        parameter: &str,
        expected: &str,
        found: ApiAttributeType,
    ) -> Self {
        EventFluxError::InvalidParameterType {
            window: window.to_string(),
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        EventFluxError::Configuration {
            message: message.into(),
        }
    }

    /// True for errors raised while validating operator parameters.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            EventFluxError::InvalidParameterCount { .. }
                | EventFluxError::InvalidParameterType { .. }
                | EventFluxError::InvalidParameter { .. }
        )
    }
}

pub type EventFluxResult<T> = Result<T, EventFluxError>;
