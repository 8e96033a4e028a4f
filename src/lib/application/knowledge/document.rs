use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Integer(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        Scalar::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

pub type Metadata = BTreeMap<String, Scalar>;

/// A unit of source text, immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A span of a [`Document`], the unit that gets embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    /// `<document id>_<index>`
    pub id: String,
    pub document_id: String,
    pub index: usize,
    pub content: String,
    pub metadata: Metadata,
}

/// One entry of `guests.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuestRecord {
    pub name: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub gossip: String,
    #[serde(default)]
    pub fun_fact: String,
}

impl GuestRecord {
    pub fn to_document(&self, source: &str, position: usize) -> Document {
        let content = format!(
            "Guest Name: {}\nInterests: {}\nBackground: {}\nGossip: {}\nFun Fact: {}",
            self.name,
            self.interests.join(", "),
            self.background,
            self.gossip,
            self.fun_fact,
        );
        Document::new(format!("{source}#{position}"), content)
            .with_metadata("source", source)
            .with_metadata("name", self.name.as_str())
            .with_metadata("kind", "guest")
    }
}
