//! Front-matter parsing
//!
//! A post starts with a delimited metadata block followed by the markdown
//! body. Three header syntaxes are recognised:
//!
//! - YAML between `---` lines
//! - TOML between `+++` lines
//! - JSON between `;;;` lines, or a bare leading `{ ... }` object
//!
//! Whatever the syntax, the metadata is decoded into [`FrontMatter`], whose
//! fields always exist: anything the author left out is an empty string or
//! an empty list.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a header block could not be decoded
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front-matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),
}

/// A scalar of any type, kept in its textual form
struct Scalar(String);

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Scalar, E> {
        Ok(Scalar(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Scalar, E> {
        Ok(Scalar(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Scalar, E> {
        Ok(Scalar(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Scalar, E> {
        Ok(Scalar(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Scalar, E> {
        Ok(Scalar(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Scalar, E> {
        Ok(Scalar(value.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar(String::new()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar(String::new()))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Any scalar as a string; null becomes the empty string
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(|s| s.0)
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(Scalar(item)) = seq.next_element::<Scalar>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,
    /// The date as authored; interpreted only when sorting
    #[serde(deserialize_with = "scalar_string")]
    pub date: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with("+++") {
            return Self::parse_toml(content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let Some((yaml_content, remaining)) = split_block(content, "---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A `---` pair can also be two markdown thematic breaks around prose
        if !looks_like_yaml(yaml_content) && !has_yaml_structure(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_toml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let Some((toml_content, remaining)) = split_block(content, "+++") else {
            return Ok((FrontMatter::default(), content));
        };

        let table: toml::Table = toml::from_str(toml_content)?;
        let value = toml_to_json(toml::Value::Table(table));
        let fm = serde_json::from_value::<FrontMatter>(value)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        if content.starts_with(";;;") {
            let Some((json_content, remaining)) = split_block(content, ";;;") else {
                return Ok((FrontMatter::default(), content));
            };

            let json_content = json_content.trim();
            let fm = if json_content.starts_with('{') {
                serde_json::from_str::<FrontMatter>(json_content)?
            } else {
                // `;;;` blocks may hold the object body without its braces
                serde_json::from_str::<FrontMatter>(&format!("{{{}}}", json_content))?
            };
            return Ok((fm, remaining));
        }

        // A bare leading object; markdown that merely starts with `{` stays content
        let mut stream = serde_json::Deserializer::from_str(content).into_iter::<FrontMatter>();
        match stream.next() {
            Some(Ok(fm)) => {
                let remaining = content[stream.byte_offset()..].trim_start_matches(['\n', '\r']);
                Ok((fm, remaining))
            }
            _ => Ok((FrontMatter::default(), content)),
        }
    }
}

/// Split `delim\n<header>\ndelim\n<body>` into header and body
fn split_block<'a>(content: &'a str, delim: &str) -> Option<(&'a str, &'a str)> {
    let first_end = content.find('\n')?;
    if content[..first_end].trim_end() != delim {
        return None;
    }

    let rest = &content[first_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delim {
            let header = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((header, body));
        }
        offset += line.len();
    }

    None
}

/// Whether a `---` block holds `key: value` lines rather than prose
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after_colon = &trimmed[colon_pos + 1..];
        after_colon.is_empty() || after_colon.starts_with(' ')
    })
}

/// Whether a line opens with a YAML flow or node indicator that prose never starts with
fn has_yaml_structure(block: &str) -> bool {
    block
        .lines()
        .map(str::trim_start)
        .any(|line| line.starts_with(['[', ']', '{', '}', '&', '%', '|', '?', '@', '`']))
}

/// TOML datetimes have no JSON counterpart; they become their string form
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::from(i),
        toml::Value::Float(f) => serde_json::Value::from(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
