//! Per-file icon extraction.
//!
//! Streams the markup with quick-xml, taking `viewBox` from the first `svg`
//! element and the `d` attribute of every `path` element in document order.
//! No DTD processing or external entity resolution takes place.

use quick_xml::{
    Decoder, Reader,
    events::{BytesStart, Event, attributes::AttrError},
};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::IconRecord;

/// Reasons a file cannot be read as an icon.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("XML parse error at position {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("invalid attribute: {0}")]
    Attr(#[from] AttrError),

    #[error("invalid attribute value: {0}")]
    Value(#[source] quick_xml::Error),

    #[error("unclosed element `{0}`")]
    Unclosed(String),

    #[error("document has no root element")]
    NoRoot,
}

/// Accumulated state while walking one document.
#[derive(Default)]
struct IconBuilder {
    svg_seen: bool,
    view_box: Option<String>,
    paths: String,
}

impl IconBuilder {
    fn visit(&mut self, elem: &BytesStart<'_>, decoder: Decoder) -> Result<(), ExtractError> {
        match elem.local_name().as_ref() {
            b"svg" if !self.svg_seen => {
                self.svg_seen = true;
                self.view_box = attr_value(elem, b"viewBox", decoder)?;
            }
            b"path" => {
                if let Some(d) = attr_value(elem, b"d", decoder)? {
                    self.push_path(&d);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Append path data with whitespace runs collapsed, plus one separator.
    ///
    /// Edge whitespace of `d` survives as a single space, so blank or padded
    /// data widens the gap to its neighbours. Only the final string is trimmed.
    fn push_path(&mut self, d: &str) {
        static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

        self.paths.push_str(&RE_WHITESPACE.replace_all(d, " "));
        self.paths.push(' ');
    }

    fn finish(self) -> IconRecord {
        IconRecord {
            view_box: self.view_box,
            paths: self.paths.trim().to_string(),
        }
    }
}

/// Look up an attribute by name, returning its unescaped value.
fn attr_value(
    elem: &BytesStart<'_>,
    name: &[u8],
    decoder: Decoder,
) -> Result<Option<String>, ExtractError> {
    for attr in elem.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(ExtractError::Value)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Extract the icon record from SVG markup.
///
/// # Example
///
/// ```ignore
/// let icon = extract_icon(r#"<svg viewBox="0 0 24 24"><path d="M10 10  L20 20"/></svg>"#)?;
/// assert_eq!(icon.paths, "M10 10 L20 20");
/// ```
pub fn extract_icon(content: &str) -> Result<IconRecord, ExtractError> {
    let mut reader = Reader::from_str(content);
    let decoder = reader.decoder();
    let mut builder = IconBuilder::default();
    let mut open: Vec<String> = Vec::new();
    let mut seen_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(elem)) => {
                seen_element = true;
                builder.visit(&elem, decoder)?;
                open.push(String::from_utf8_lossy(elem.name().as_ref()).into_owned());
            }
            Ok(Event::Empty(elem)) => {
                seen_element = true;
                builder.visit(&elem, decoder)?;
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(source) => {
                return Err(ExtractError::Xml {
                    position: reader.error_position() as u64,
                    source,
                });
            }
        }
    }

    if let Some(name) = open.pop() {
        return Err(ExtractError::Unclosed(name));
    }
    if !seen_element {
        return Err(ExtractError::NoRoot);
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_view_box_and_path() {
        let icon =
            extract_icon(r#"<svg viewBox="0 0 24 24"><path d="M10 10  L20   20"/></svg>"#).unwrap();
        assert_eq!(icon.view_box.as_deref(), Some("0 0 24 24"));
        assert_eq!(icon.paths, "M10 10 L20 20");
    }

    #[test]
    fn test_multiple_paths_in_document_order() {
        let icon = extract_icon(r#"<svg><path d="M0 0"/><path d="L5 5"/></svg>"#).unwrap();
        assert_eq!(icon.view_box, None);
        assert_eq!(icon.paths, "M0 0 L5 5");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let svg = "<svg>\n  <path d=\"  M1\t1\n\n  L2 2  \"/>\n  <path d=\"Z\"/>\n</svg>";
        let icon = extract_icon(svg).unwrap();
        assert_eq!(icon.paths, "M1 1 L2 2  Z");
    }

    #[test]
    fn test_no_paths_gives_empty_string() {
        let icon = extract_icon(r#"<svg viewBox="0 0 8 8"><circle r="4"/></svg>"#).unwrap();
        assert_eq!(icon.view_box.as_deref(), Some("0 0 8 8"));
        assert_eq!(icon.paths, "");
    }

    #[test]
    fn test_nested_paths_are_collected() {
        let svg = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16">
  <defs><path id="a" d="M1 1"/></defs>
  <g fill="none"><g><path d="M2 2"></path></g></g>
</svg>"#;
        let icon = extract_icon(svg).unwrap();
        assert_eq!(icon.paths, "M1 1 M2 2");
    }

    #[test]
    fn test_view_box_is_verbatim() {
        let icon = extract_icon(r#"<svg viewBox="0  0 24.5  24"/>"#).unwrap();
        assert_eq!(icon.view_box.as_deref(), Some("0  0 24.5  24"));
    }

    #[test]
    fn test_view_box_from_first_svg_only() {
        let svg = r#"<svg viewBox="0 0 10 10"><svg viewBox="0 0 1 1"><path d="M0 0"/></svg></svg>"#;
        let icon = extract_icon(svg).unwrap();
        assert_eq!(icon.view_box.as_deref(), Some("0 0 10 10"));
    }

    #[test]
    fn test_padded_and_blank_paths_keep_their_spaces() {
        let svg = r#"<svg><path d="M0 0"/><path d=" M1 1 "/><path d=""/><path d="L5 5"/></svg>"#;
        let icon = extract_icon(svg).unwrap();
        assert_eq!(icon.paths, "M0 0  M1 1   L5 5");
    }

    #[test]
    fn test_edge_whitespace_trimmed_from_result() {
        let icon = extract_icon("<svg><path d=\"\n  M0 0\"/><path d=\"L1 1\t\"/></svg>").unwrap();
        assert_eq!(icon.paths, "M0 0 L1 1");
    }

    #[test]
    fn test_path_without_d_is_ignored() {
        let icon = extract_icon(r#"<svg><path/><path d=""/><path d="M3 3"/></svg>"#).unwrap();
        assert_eq!(icon.paths, "M3 3");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let icon = extract_icon(r#"<svg viewBox="0&#32;0 4 4"><path d="M0&#x20;0"/></svg>"#)
            .unwrap();
        assert_eq!(icon.view_box.as_deref(), Some("0 0 4 4"));
        assert_eq!(icon.paths, "M0 0");
    }

    #[test]
    fn test_prefixed_elements_match_local_name() {
        let svg = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" viewBox="0 0 2 2"><svg:path d="M1 1"/></svg:svg>"#;
        let icon = extract_icon(svg).unwrap();
        assert_eq!(icon.view_box.as_deref(), Some("0 0 2 2"));
        assert_eq!(icon.paths, "M1 1");
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        let result = extract_icon(r#"<svg><path d="M0 0"></svg>"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unclosed_root_is_error() {
        let result = extract_icon(r#"<svg viewBox="0 0 1 1"><path d="M0 0"/>"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(matches!(extract_icon(""), Err(ExtractError::NoRoot)));
        assert!(matches!(extract_icon("just text"), Err(ExtractError::NoRoot)));
    }

    #[test]
    fn test_unknown_entity_is_error() {
        let result = extract_icon(r#"<svg><path d="M0 0&bogus;"/></svg>"#);
        assert!(result.is_err());
    }
}
