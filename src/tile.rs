//! Tile definitions and JSON rendering.
//!
//! A tile is one element of a Marquette dashboard: a button that publishes a
//! fixed payload to a topic, or a text readout subscribed to one. The
//! dashboard loads the assembled array from `tiles.json` and dispatches on
//! the `type` tag.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io;

/// One dashboard tile.
///
/// Buttons never carry `subscribe_topic`; text tiles never carry
/// `publish_topic`/`publish_payload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tile {
    Button {
        title: String,
        publish_topic: String,
        publish_payload: String,
    },
    Text {
        title: String,
        subscribe_topic: String,
    },
}

/// Single-line formatter with a space after each `:` and `,`, matching the
/// format the dashboard's tile files have always used.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Render a tile list as a single-line JSON array.
///
/// serde_json escapes quotes and control characters in field values, so a
/// title or payload can contain anything without corrupting the document.
pub fn render(tiles: &[Tile]) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    tiles.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(title: &str, topic: &str, payload: &str) -> Tile {
        Tile::Button {
            title: title.to_string(),
            publish_topic: topic.to_string(),
            publish_payload: payload.to_string(),
        }
    }

    fn text(title: &str, topic: &str) -> Tile {
        Tile::Text {
            title: title.to_string(),
            subscribe_topic: topic.to_string(),
        }
    }

    #[test]
    fn test_empty_list_renders_empty_array() {
        assert_eq!(render(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_button_render() {
        let json = render(&[button("Go", "cmd/go", "1")]).unwrap();
        assert_eq!(
            json,
            r#"[{"type": "button", "title": "Go", "publish_topic": "cmd/go", "publish_payload": "1"}]"#
        );
    }

    #[test]
    fn test_text_render() {
        let json = render(&[text("Status", "status/go")]).unwrap();
        assert_eq!(
            json,
            r#"[{"type": "text", "title": "Status", "subscribe_topic": "status/go"}]"#
        );
    }

    #[test]
    fn test_mixed_tiles_are_comma_separated() {
        let json = render(&[button("Go", "cmd/go", "1"), text("Status", "status/go")]).unwrap();
        assert_eq!(
            json,
            r#"[{"type": "button", "title": "Go", "publish_topic": "cmd/go", "publish_payload": "1"}, {"type": "text", "title": "Status", "subscribe_topic": "status/go"}]"#
        );
    }

    #[test]
    fn test_button_has_exactly_the_button_keys() {
        let json = render(&[button("Go", "cmd/go", "1")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let mut keys: Vec<&str> = value[0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["publish_payload", "publish_topic", "title", "type"]);
    }

    #[test]
    fn test_text_has_exactly_the_text_keys() {
        let json = render(&[text("Status", "status/go")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let mut keys: Vec<&str> = value[0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["subscribe_topic", "title", "type"]);
    }

    #[test]
    fn test_quotes_in_fields_survive_a_round_trip() {
        let tiles = vec![button("it's \"go\" time", "cmd/go", "1")];
        let json = render(&tiles).unwrap();
        assert!(json.contains(r#"it's \"go\" time"#));

        let parsed: Vec<Tile> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tiles);
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let json = render(&[text("line\nbreak", "status/go")]).unwrap();
        assert!(json.contains(r"line\nbreak"));
        let parsed: Vec<Tile> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![text("line\nbreak", "status/go")]);
    }

    #[test]
    fn test_deserialize_dispatches_on_type_tag() {
        let json = r#"[{"type": "button", "title": "Go", "publish_topic": "cmd/go", "publish_payload": "1"}, {"type": "text", "title": "Status", "subscribe_topic": "status/go"}]"#;
        let tiles: Vec<Tile> = serde_json::from_str(json).unwrap();
        assert_eq!(tiles.len(), 2);
        assert!(matches!(tiles[0], Tile::Button { .. }));
        assert!(matches!(tiles[1], Tile::Text { .. }));
    }
}
