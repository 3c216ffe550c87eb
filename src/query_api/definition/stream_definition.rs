// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/definition/stream_definition.rs

use crate::query_api::definition::attribute::{Attribute, Type as AttributeType};

/// Defines a stream with a unique ID and an ordered list of attributes.
///
/// The window uses it to resolve the timestamp attribute by name into a
/// position within `before_window_data`, and to size its event cloner.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StreamDefinition {
    id: String,
    attribute_list: Vec<Attribute>,
}

impl StreamDefinition {
    pub fn new(id: String) -> Self {
        StreamDefinition {
            id,
            attribute_list: Vec::new(),
        }
    }

    pub fn id(stream_id: String) -> Self {
        Self::new(stream_id)
    }

    // Builder-style attribute registration
    pub fn attribute(mut self, attribute_name: String, attribute_type: AttributeType) -> Self {
        if self
            .attribute_list
            .iter()
            .any(|attr| attr.get_name() == &attribute_name)
        {
            log::warn!(
                "Duplicate attribute '{}' in stream definition '{}'",
                attribute_name,
                self.id
            );
        }
        self.attribute_list
            .push(Attribute::new(attribute_name, attribute_type));
        self
    }

    /// Parse a `name:type` list such as `"symbol:string, price:double, ts:long"`.
    pub fn from_schema(id: &str, schema: &str) -> Result<Self, String> {
        let mut definition = StreamDefinition::new(id.to_string());
        for field in schema.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            let (name, type_name) = field
                .split_once(':')
                .ok_or_else(|| format!("Schema field '{field}' must be written as name:type"))?;
            let attr_type = AttributeType::from_str(type_name)?;
            definition = definition.attribute(name.trim().to_string(), attr_type);
        }
        if definition.attribute_list.is_empty() {
            return Err(format!("Stream '{id}' has no attributes"));
        }
        Ok(definition)
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn get_attribute_list(&self) -> &[Attribute] {
        &self.attribute_list
    }

    /// Position and type of the named attribute.
    pub fn find_attribute(&self, name: &str) -> Option<(usize, AttributeType)> {
        self.attribute_list
            .iter()
            .position(|attr| attr.get_name() == name)
            .map(|idx| (idx, *self.attribute_list[idx].get_type()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_definition_creation_and_attributes() {
        let stream_def = StreamDefinition::new("InputStream".to_string())
            .attribute("userID".to_string(), AttributeType::STRING)
            .attribute("value".to_string(), AttributeType::INT);

        assert_eq!(stream_def.get_id(), "InputStream");

        let attributes = stream_def.get_attribute_list();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].get_name(), "userID");
        assert_eq!(attributes[1].get_type(), &AttributeType::INT);
    }

    #[test]
    fn test_from_schema() {
        let def = StreamDefinition::from_schema("Trades", "symbol:string, ts:long").unwrap();
        assert_eq!(def.find_attribute("ts"), Some((1, AttributeType::LONG)));
        assert_eq!(def.find_attribute("missing"), None);
    }

    #[test]
    fn test_from_schema_rejects_malformed_field() {
        assert!(StreamDefinition::from_schema("S", "symbol").is_err());
        assert!(StreamDefinition::from_schema("S", "").is_err());
        assert!(StreamDefinition::from_schema("S", "ts:date").is_err());
    }
}
