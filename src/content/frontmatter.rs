//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Why a metadata block could not be turned into a [`FrontMatter`]
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("file does not start with a front-matter block (---, +++ or ;;;)")]
    Missing,

    #[error("front-matter block opened with {0:?} is never closed")]
    Unterminated(&'static str),

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front-matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unparseable date {0:?}")]
    Date(String),
}

/// Accepts a plain string, or the datetime wrapper TOML produces for bare
/// `date = 2024-06-01` values.
fn string_or_datetime<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, MapAccess, Visitor};
    use std::fmt;

    struct StringOrDatetime;

    impl<'de> Visitor<'de> for StringOrDatetime {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a date string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            match map.next_entry::<String, String>()? {
                Some((_, value)) => Ok(value),
                None => Err(de::Error::invalid_length(0, &self)),
            }
        }
    }

    deserializer.deserialize_any(StringOrDatetime)
}

/// Metadata block at the top of an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,

    /// Raw date as written in the file; see [`FrontMatter::parse_date`]
    #[serde(deserialize_with = "string_or_datetime")]
    pub date: String,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub draft: bool,

    /// Any other keys, in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            let (block, body) = split_block(content, "---")?;
            let fm = serde_yaml::from_str(block)?;
            return Ok((fm, body));
        }

        if content.starts_with("+++") {
            let (block, body) = split_block(content, "+++")?;
            let fm = toml::from_str(block)?;
            return Ok((fm, body));
        }

        if content.starts_with(";;;") {
            let (block, body) = split_block(content, ";;;")?;
            let fm = serde_json::from_str(block)?;
            return Ok((fm, body));
        }

        Err(FrontMatterError::Missing)
    }

    /// Parse the date into an instant. Values without an offset are read in `tz`.
    pub fn parse_date(&self, tz: &Tz) -> Result<DateTime<Utc>, FrontMatterError> {
        parse_date_string(&self.date, tz).ok_or_else(|| FrontMatterError::Date(self.date.clone()))
    }
}

/// Split `content` into the text between the opening and closing `delimiter`
/// lines and the body that follows.
fn split_block<'a>(
    content: &'a str,
    delimiter: &'static str,
) -> Result<(&'a str, &'a str), FrontMatterError> {
    let rest = &content[delimiter.len()..];

    // The opening line holds nothing but the delimiter
    let rest = match rest.find('\n') {
        Some(pos) if rest[..pos].trim().is_empty() => &rest[pos + 1..],
        Some(_) => return Err(FrontMatterError::Missing),
        None => return Err(FrontMatterError::Unterminated(delimiter)),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let block = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Ok((block, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated(delimiter))
}

/// Parse a date string in various formats
fn parse_date_string(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 with an offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset_formats = [
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%z",
    ];
    for fmt in offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, tz);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return localize(d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

fn localize(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
excerpt: A first post
cover: /images/hello.png
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Hello World");
        assert_eq!(fm.date, "2024-01-15");
        assert_eq!(fm.excerpt.as_deref(), Some("A first post"));
        assert!(!fm.draft);
        assert_eq!(fm.extra["cover"], "/images/hello.png");
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = r#"+++
title = "Toml Post"
date = 2024-06-01
draft = true
+++
Body
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Toml Post");
        assert_eq!(fm.date, "2024-06-01");
        assert!(fm.draft);
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#";;;
{"title": "Json Post", "date": "2024-03-02T08:00:00Z", "tags": ["a", "b"]}
;;;
Body
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Json Post");
        assert_eq!(fm.extra["tags"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_missing_frontmatter() {
        let err = FrontMatter::parse("# Just a heading\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let err = FrontMatter::parse("---\ntitle: Oops\ndate: 2024-01-01\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated("---")));
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let err = FrontMatter::parse("---\ndate: 2024-01-01\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_non_string_date_is_an_error() {
        let err = FrontMatter::parse("---\ntitle: T\ndate: 2024\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let content = "---\ntitle: T\ndate: 2024-01-01\n---\nbefore\n\n---\n\nafter\n";
        let (_, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(body, "before\n\n---\n\nafter\n");
    }

    #[test]
    fn test_parse_date_formats() {
        let utc = chrono_tz::UTC;
        let expect = |s: &str| parse_date_string(s, &utc).unwrap().to_rfc3339();

        assert_eq!(expect("2024-01-15"), "2024-01-15T00:00:00+00:00");
        assert_eq!(expect("2024/01/15 10:30:00"), "2024-01-15T10:30:00+00:00");
        assert_eq!(expect("2024-01-15T10:30"), "2024-01-15T10:30:00+00:00");
        assert_eq!(expect("2024-01-15T10:30:00+02:00"), "2024-01-15T08:30:00+00:00");
        assert_eq!(expect("2024-01-15T10:30:00.250Z"), "2024-01-15T10:30:00.250+00:00");
        assert!(parse_date_string("next tuesday", &utc).is_none());
        assert!(parse_date_string("2024-13-01", &utc).is_none());
    }

    #[test]
    fn test_naive_date_uses_timezone() {
        let fm = FrontMatter {
            title: "T".to_string(),
            date: "2024-06-01 12:00:00".to_string(),
            excerpt: None,
            draft: false,
            extra: IndexMap::new(),
        };

        let dt = fm.parse_date(&chrono_tz::Europe::Madrid).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    }
}
