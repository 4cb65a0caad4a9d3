//! Front-matter parsing

use thiserror::Error;

use super::{Metadata, ParsedDocument};

const DELIMITER: &str = "---";

/// Splits a source file into metadata and body
pub trait FrontMatterParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<ParsedDocument, FrontMatterError>;
}

/// Why a front-matter block could not be parsed
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter block is not closed by a `---` line")]
    Unterminated,

    #[error("unsupported front-matter language `{0}`")]
    UnsupportedLanguage(String),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),
}

/// Front-matter in a `---` fenced block at the very top of the file.
///
/// The opening fence may carry a language tag (`---yaml`, `---json`); YAML is
/// the default. A file that does not start with a fence has no front-matter
/// and is all body.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedFrontMatter;

impl FrontMatterParser for FencedFrontMatter {
    fn parse(&self, raw: &str) -> Result<ParsedDocument, FrontMatterError> {
        let content = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let Some(rest) = content.strip_prefix(DELIMITER) else {
            return Ok(ParsedDocument::body_only(content));
        };
        // `----` is a thematic break, not a fence
        if rest.starts_with('-') {
            return Ok(ParsedDocument::body_only(content));
        }

        let (language, block) = rest.split_once('\n').ok_or(FrontMatterError::Unterminated)?;
        let language = language.trim();

        let (matter, body) = split_closing(block).ok_or(FrontMatterError::Unterminated)?;
        let metadata = parse_metadata(language, matter)?;

        Ok(ParsedDocument {
            metadata,
            body: body.to_string(),
        })
    }
}

/// Find the closing fence line; returns (matter, body)
fn split_closing(block: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in block.split_inclusive('\n') {
        let text = line.trim_end_matches(['\n', '\r']);
        if text == DELIMITER {
            return Some((&block[..offset], &block[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_metadata(language: &str, matter: &str) -> Result<Metadata, FrontMatterError> {
    if matter.trim().is_empty() {
        return Ok(Metadata::new());
    }

    match language {
        "" | "yaml" | "yml" => match serde_yaml::from_str::<serde_yaml::Value>(matter)? {
            serde_yaml::Value::Null => Ok(Metadata::new()),
            value @ serde_yaml::Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
            _ => Err(FrontMatterError::NotAMapping),
        },
        "json" => match serde_json::from_str::<serde_json::Value>(matter)? {
            serde_json::Value::Null => Ok(Metadata::new()),
            value @ serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Err(FrontMatterError::NotAMapping),
        },
        other => Err(FrontMatterError::UnsupportedLanguage(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<ParsedDocument, FrontMatterError> {
        FencedFrontMatter.parse(raw)
    }

    fn title(doc: &ParsedDocument) -> Option<&str> {
        doc.metadata.get("title").and_then(|v| v.as_str())
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
tags:
  - rust
  - blog
---
# Welcome
This is **bold**.
"#;

        let doc = parse(content).unwrap();
        assert_eq!(title(&doc), Some("Hello World"));
        assert_eq!(doc.metadata["tags"].as_sequence().map(|s| s.len()), Some(2));
        assert_eq!(doc.body, "# Welcome\nThis is **bold**.\n");
    }

    #[test]
    fn test_no_frontmatter_is_all_body() {
        let content = "# Just markdown\n\nNo metadata here.\n";
        let doc = parse(content).unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_fence_must_be_at_top() {
        let content = "\n---\ntitle: Late\n---\nBody";
        let doc = parse(content).unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_thematic_break_is_not_a_fence() {
        let content = "----\ntitle: nope\n----\n";
        let doc = parse(content).unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_empty_and_comment_only_blocks() {
        let doc = parse("---\n---\nBody\n").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "Body\n");

        let doc = parse("---\n# just a comment\n---\nBody\n").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "Body\n");
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("---\ntitle: Open\n\n# Body\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));

        let err = parse("---").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse("---\ntitle: [unclosed\n---\nBody\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_non_mapping_yaml() {
        let err = parse("---\n- a\n- b\n---\nBody\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping));
    }

    #[test]
    fn test_json_frontmatter() {
        let content = "---json\n{\"title\": \"From JSON\", \"draft\": false}\n---\nBody\n";
        let doc = parse(content).unwrap();
        assert_eq!(title(&doc), Some("From JSON"));
        assert_eq!(doc.metadata["draft"].as_bool(), Some(false));
        assert_eq!(doc.body, "Body\n");
    }

    #[test]
    fn test_unsupported_language() {
        let err = parse("---toml\ntitle = \"x\"\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::UnsupportedLanguage(lang) if lang == "toml"));
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let doc = parse(content).unwrap();
        assert_eq!(title(&doc), Some("Windows"));
        assert_eq!(doc.body, "Body\r\n");
    }

    #[test]
    fn test_body_may_contain_more_fences() {
        let content = "---\ntitle: Rules\n---\nAbove\n\n---\n\nBelow\n";
        let doc = parse(content).unwrap();
        assert_eq!(title(&doc), Some("Rules"));
        assert_eq!(doc.body, "Above\n\n---\n\nBelow\n");
    }
}
