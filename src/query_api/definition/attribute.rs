// SPDX-License-Identifier: MIT OR Apache-2.0

// src/query_api/definition/attribute.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type of a stream attribute.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Type {
    STRING,
    INT,
    LONG,
    FLOAT,
    DOUBLE,
    BOOL,
    #[default]
    OBJECT,
}

impl Type {
    /// Parse a type name as written in a schema string (`long`, `BIGINT`, `string`, ...).
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "string" | "varchar" => Ok(Type::STRING),
            "int" | "integer" => Ok(Type::INT),
            "long" | "bigint" => Ok(Type::LONG),
            "float" => Ok(Type::FLOAT),
            "double" => Ok(Type::DOUBLE),
            "bool" | "boolean" => Ok(Type::BOOL),
            "object" => Ok(Type::OBJECT),
            other => Err(format!("Unknown attribute type '{other}'")),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::STRING => "STRING",
            Type::INT => "INT",
            Type::LONG => "LONG",
            Type::FLOAT => "FLOAT",
            Type::DOUBLE => "DOUBLE",
            Type::BOOL => "BOOL",
            Type::OBJECT => "OBJECT",
        };
        f.write_str(name)
    }
}

/// A named, typed attribute of a stream definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    attribute_type: Type,
}

impl Attribute {
    pub fn new(name: String, attribute_type: Type) -> Self {
        Self {
            name,
            attribute_type,
        }
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_type(&self) -> &Type {
        &self.attribute_type
    }
}
