//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Header delimiter line
const DELIMITER: &str = "---";

/// Ways a front-matter header can be malformed
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter opened with `---` but never closed")]
    Unterminated,

    #[error("invalid YAML in front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,
}

/// A YAML scalar read back as a string
struct ScalarString(String);

impl<'de> Deserialize<'de> for ScalarString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = ScalarString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(ScalarString(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(ScalarString(value.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

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
            // Blank list items (`-` with nothing after it) are skipped
            while let Some(item) = seq.next_element::<Option<ScalarString>>()? {
                if let Some(ScalarString(item)) = item {
                    vec.push(item);
                }
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

/// Read any scalar (string, number, boolean) as text, e.g. `title: 2048`
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ScalarString>::deserialize(deserializer)?.map(|s| s.0))
}

/// Front-matter data from a post or page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    /// Unrecognized keys, in source order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split the header block off a raw document.
    ///
    /// Returns the header text (without delimiters) and the body. A
    /// document that does not open with a `---` line has no header and
    /// its whole text is the body.
    pub fn split(raw: &str) -> Result<(Option<&str>, &str), FrontMatterError> {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let mut lines = raw.split_inclusive('\n');
        let first = match lines.next() {
            Some(line) => line,
            None => return Ok((None, raw)),
        };
        if !is_delimiter(first) {
            return Ok((None, raw));
        }

        let header_start = first.len();
        let mut offset = header_start;
        for line in lines {
            if is_delimiter(line) {
                let header = &raw[header_start..offset];
                let body = &raw[offset + line.len()..];
                return Ok((Some(header), body));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(raw: &str) -> Result<(Self, &str), FrontMatterError> {
        let (header, body) = Self::split(raw)?;
        let header = match header {
            Some(header) => header,
            None => return Ok((FrontMatter::default(), body)),
        };
        if header.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let value: serde_yaml::Value = serde_yaml::from_str(header)?;
        let fm = match value {
            // `---\n---` and comment-only headers carry no keys
            serde_yaml::Value::Null => FrontMatter::default(),
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)?,
            _ => return Err(FrontMatterError::NotAMapping),
        };

        Ok((fm, body))
    }

    /// Render the header block back out, delimiters included
    pub fn to_header(&self) -> Result<String, FrontMatterError> {
        let yaml = if self.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(self)?
        };
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
    }

    /// Whether no key at all was set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.tags.is_empty()
            && self.extra.is_empty()
    }

    /// Look up an unrecognized key as a string
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
description: First post
tags:
  - rust
  - blog
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.description.as_deref(), Some("First post"));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert!(fm.extra.is_empty());
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_extra_keys_keep_order() {
        let content = r#"---
title: Post
templateKey: blog-post
featuredpost: true
linkedinUrl: https://example.com/post
---
Body
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = fm.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["templateKey", "featuredpost", "linkedinUrl"]);
        assert_eq!(fm.extra_str("templateKey"), Some("blog-post"));
        assert_eq!(fm.extra.get("featuredpost"), Some(&serde_yaml::Value::Bool(true)));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single Tag Post\ntags: Notes\n---\nContent here.\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_empty_tags_and_numeric_values() {
        let content = "---\ntags:\ndate: 2024\n---\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.tags.is_empty());
        assert_eq!(fm.date.as_deref(), Some("2024"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_numeric_title_and_description() {
        let content = "---\ntitle: 2048\ndescription: 404\n---\nBody\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("2048"));
        assert_eq!(fm.description.as_deref(), Some("404"));
    }

    #[test]
    fn test_blank_tag_items_are_skipped() {
        let content = "---\ntags:\n  - rust\n  -\n  - web\n---\nBody\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\n---\n\nwith a rule\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_header() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nBody\r\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(remaining, "Body\r\n");
    }

    #[test]
    fn test_body_keeps_later_rules() {
        let content = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow\n";

        let (_, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(remaining, "above\n\n---\n\nbelow\n");
    }

    #[test]
    fn test_unterminated_header() {
        let content = "---\ntitle: Never closed\n\nBody text\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_invalid_yaml() {
        let content = "---\ntitle: [unclosed\n---\nBody\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_header_not_a_mapping() {
        let content = "---\n- just\n- a list\n---\nBody\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping));
    }

    #[test]
    fn test_wrong_shape_for_known_field() {
        let content = "---\ntitle:\n  nested: map\n---\nBody\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_header_recombines_with_body() {
        let content = r#"---
title: Round Trip
date: 2024-06-01
tags: [x, y]
series: intro
---
Body line one
Body line two
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        let rebuilt = format!("{}{}", fm.to_header().unwrap(), body);
        let (fm2, body2) = FrontMatter::parse(&rebuilt).unwrap();
        assert_eq!(fm, fm2);
        assert_eq!(body, body2);
    }
}
