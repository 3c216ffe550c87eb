// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/util/serialization.rs
// bincode helpers shared by state holders.

use crate::core::persistence::state_holder::StateError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, StateError> {
    bincode::serialize(value).map_err(|e| StateError::SerializationError {
        message: e.to_string(),
    })
}

pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StateError> {
    bincode::deserialize(bytes).map_err(|e| StateError::DeserializationError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::stream::StreamEvent;
    use crate::core::event::value::AttributeValue;

    #[test]
    fn test_stream_event_bytes() {
        let event = StreamEvent::new_with_data(
            7,
            vec![AttributeValue::Long(7), AttributeValue::String("x".into())],
        );
        let bytes = to_bytes(&event).unwrap();
        let back: StreamEvent = from_bytes(&bytes).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let bytes = to_bytes(&StreamEvent::new_with_data(1, vec![AttributeValue::Long(1)])).unwrap();
        let err = from_bytes::<StreamEvent>(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, StateError::DeserializationError { .. }));
    }
}
