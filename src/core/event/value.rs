// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/event/value.rs
use crate::query_api::definition::attribute::Type as ApiAttributeType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::fmt;

/// A single attribute value carried inside an event.
#[derive(Default)]
pub enum AttributeValue {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    /// Raw binary payload; unlike `Object` it survives cloning and snapshots.
    Bytes(Vec<u8>),
    Object(Option<Box<dyn Any + Send + Sync>>),
    #[default]
    Null,
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "String({s:?})"),
            AttributeValue::Int(i) => write!(f, "Int({i:?})"),
            AttributeValue::Long(l) => write!(f, "Long({l:?})"),
            AttributeValue::Float(fl) => write!(f, "Float({fl:?})"),
            AttributeValue::Double(d) => write!(f, "Double({d:?})"),
            AttributeValue::Bool(b) => write!(f, "Bool({b:?})"),
            AttributeValue::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            AttributeValue::Object(_) => write!(f, "Object(<opaque>)"),
            AttributeValue::Null => write!(f, "Null"),
        }
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttributeValue::String(a), AttributeValue::String(b)) => a == b,
            (AttributeValue::Int(a), AttributeValue::Int(b)) => a == b,
            (AttributeValue::Long(a), AttributeValue::Long(b)) => a == b,
            (AttributeValue::Float(a), AttributeValue::Float(b)) => a == b,
            (AttributeValue::Double(a), AttributeValue::Double(b)) => a == b,
            (AttributeValue::Bool(a), AttributeValue::Bool(b)) => a == b,
            (AttributeValue::Bytes(a), AttributeValue::Bytes(b)) => a == b,
            (AttributeValue::Null, AttributeValue::Null) => true,
            // Opaque objects have no value identity
            (AttributeValue::Object(_), AttributeValue::Object(_)) => false,
            _ => false,
        }
    }
}

impl Clone for AttributeValue {
    fn clone(&self) -> Self {
        match self {
            AttributeValue::String(s) => AttributeValue::String(s.clone()),
            AttributeValue::Int(i) => AttributeValue::Int(*i),
            AttributeValue::Long(l) => AttributeValue::Long(*l),
            AttributeValue::Float(f) => AttributeValue::Float(*f),
            AttributeValue::Double(d) => AttributeValue::Double(*d),
            AttributeValue::Bool(b) => AttributeValue::Bool(*b),
            AttributeValue::Bytes(bytes) => AttributeValue::Bytes(bytes.clone()),
            AttributeValue::Object(_) => AttributeValue::Object(None),
            AttributeValue::Null => AttributeValue::Null,
        }
    }
}

// --- serde support ---
#[derive(Serialize, Deserialize)]
enum AttrSer {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Null,
}

impl Serialize for AttributeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let repr = match self {
            AttributeValue::String(s) => AttrSer::String(s.clone()),
            AttributeValue::Int(i) => AttrSer::Int(*i),
            AttributeValue::Long(l) => AttrSer::Long(*l),
            AttributeValue::Float(f) => AttrSer::Float(*f),
            AttributeValue::Double(d) => AttrSer::Double(*d),
            AttributeValue::Bool(b) => AttrSer::Bool(*b),
            AttributeValue::Bytes(bytes) => AttrSer::Bytes(bytes.clone()),
            _ => AttrSer::Null,
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = AttrSer::deserialize(deserializer)?;
        Ok(match repr {
            AttrSer::String(s) => AttributeValue::String(s),
            AttrSer::Int(i) => AttributeValue::Int(i),
            AttrSer::Long(l) => AttributeValue::Long(l),
            AttrSer::Float(f) => AttributeValue::Float(f),
            AttrSer::Double(d) => AttributeValue::Double(d),
            AttrSer::Bool(b) => AttributeValue::Bool(b),
            AttrSer::Bytes(bytes) => AttributeValue::Bytes(bytes),
            AttrSer::Null => AttributeValue::Null,
        })
    }
}

impl AttributeValue {
    pub fn as_string(&self) -> Option<&String> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    pub fn get_type(&self) -> ApiAttributeType {
        match self {
            AttributeValue::String(_) => ApiAttributeType::STRING,
            AttributeValue::Int(_) => ApiAttributeType::INT,
            AttributeValue::Long(_) => ApiAttributeType::LONG,
            AttributeValue::Float(_) => ApiAttributeType::FLOAT,
            AttributeValue::Double(_) => ApiAttributeType::DOUBLE,
            AttributeValue::Bool(_) => ApiAttributeType::BOOL,
            AttributeValue::Bytes(_) | AttributeValue::Object(_) | AttributeValue::Null => {
                ApiAttributeType::OBJECT
            }
        }
    }

    /// Convert a JSON scalar into a value of the declared attribute type.
    /// JSON `null` maps to `Null` for every type.
    pub fn from_json(value: &serde_json::Value, attr_type: ApiAttributeType) -> Result<Self, String> {
        use serde_json::Value as Json;

        if value.is_null() {
            return Ok(AttributeValue::Null);
        }
        let converted = match (attr_type, value) {
            (ApiAttributeType::STRING, Json::String(s)) => Some(AttributeValue::String(s.clone())),
            (ApiAttributeType::INT, Json::Number(n)) => n
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(AttributeValue::Int),
            (ApiAttributeType::LONG, Json::Number(n)) => n.as_i64().map(AttributeValue::Long),
            (ApiAttributeType::FLOAT, Json::Number(n)) => {
                n.as_f64().map(|v| AttributeValue::Float(v as f32))
            }
            (ApiAttributeType::DOUBLE, Json::Number(n)) => n.as_f64().map(AttributeValue::Double),
            (ApiAttributeType::BOOL, Json::Bool(b)) => Some(AttributeValue::Bool(*b)),
            _ => None,
        };
        converted.ok_or_else(|| format!("Cannot convert JSON value {value} to {attr_type}"))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Long(l) => write!(f, "{l}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Double(v) => write!(f, "{v}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Bytes(bytes) => write!(f, "<bytes:{}>", bytes.len()),
            AttributeValue::Object(_) => write!(f, "<object>"),
            AttributeValue::Null => write!(f, "null"),
        }
    }
}
