// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/complex_event.rs
use super::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::{self, Debug};

/// Type of complex event (CURRENT, EXPIRED, TIMER, RESET).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComplexEventType {
    #[default]
    Current,
    Expired,
    Timer,
    Reset,
}

impl fmt::Display for ComplexEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComplexEventType::Current => "CURRENT",
            ComplexEventType::Expired => "EXPIRED",
            ComplexEventType::Timer => "TIMER",
            ComplexEventType::Reset => "RESET",
        };
        f.write_str(name)
    }
}

/// Common view over stream and state events, used by expression executors.
pub trait ComplexEvent: Debug + Send + Sync + 'static {
    fn get_output_data(&self) -> Option<&[AttributeValue]>;
    fn set_output_data(&mut self, data: Option<Vec<AttributeValue>>);

    fn get_timestamp(&self) -> i64;
    fn set_timestamp(&mut self, timestamp: i64);

    fn get_event_type(&self) -> ComplexEventType;
    fn set_event_type(&mut self, event_type: ComplexEventType);

    fn is_expired(&self) -> bool {
        self.get_event_type() == ComplexEventType::Expired
    }

    fn set_expired(&mut self, expired: bool) {
        if expired {
            self.set_event_type(ComplexEventType::Expired);
        } else if self.get_event_type() == ComplexEventType::Expired {
            // TIMER and RESET keep their type
            self.set_event_type(ComplexEventType::Current);
        }
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
