use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical database column type tags understood by the hydration engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbType {
    Array,
    BigInt,
    Boolean,
    Char,
    Double,
    Int,
    Json,
    Jsonb,
    Text,
    Varchar,
}

impl DbType {
    /// Columns of this type arrive JSON-encoded and are decoded before assignment
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::Jsonb)
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => write!(f, "array"),
            Self::BigInt => write!(f, "bigint"),
            Self::Boolean => write!(f, "boolean"),
            Self::Char => write!(f, "char"),
            Self::Double => write!(f, "double"),
            Self::Int => write!(f, "int"),
            Self::Json => write!(f, "json"),
            Self::Jsonb => write!(f, "jsonb"),
            Self::Text => write!(f, "text"),
            Self::Varchar => write!(f, "varchar"),
        }
    }
}

impl std::str::FromStr for DbType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "array" => Ok(Self::Array),
            "bigint" | "int8" => Ok(Self::BigInt),
            "boolean" | "bool" => Ok(Self::Boolean),
            "char" | "bpchar" => Ok(Self::Char),
            "double" | "float8" => Ok(Self::Double),
            "int" | "integer" | "int4" => Ok(Self::Int),
            "json" => Ok(Self::Json),
            "jsonb" => Ok(Self::Jsonb),
            "text" => Ok(Self::Text),
            "varchar" => Ok(Self::Varchar),
            _ => Err(format!("Invalid database type: {s}")),
        }
    }
}
