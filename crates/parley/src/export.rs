//! JSON export of the layout context.

use std::io;

use log::debug;

use crate::{config::ExportConfig, layout::LayoutContext};

/// Serializes a [`LayoutContext`] for the external renderer.
#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            pretty: config.pretty(),
        }
    }

    /// Serialize `context` to a JSON string.
    pub fn export(&self, context: &LayoutContext) -> serde_json::Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(context)?
        } else {
            serde_json::to_string(context)?
        };
        debug!(bytes = json.len(), pretty = self.pretty; "Layout context serialized");
        Ok(json)
    }

    /// Serialize `context` into `writer`.
    pub fn export_to_writer<W: io::Write>(
        &self,
        context: &LayoutContext,
        writer: W,
    ) -> serde_json::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(writer, context)
        } else {
            serde_json::to_writer(writer, context)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        geometry::Point,
        layout::{MessageLayout, MessageType, ParticipantLayout, SequenceLayout},
    };

    fn context() -> LayoutContext {
        LayoutContext {
            name: None,
            actors: vec![ParticipantLayout {
                name: "A".to_string(),
                description: String::new(),
                position: Point::new(0.0, 0.0),
            }],
            objects: Vec::new(),
            sequences: vec![SequenceLayout {
                name: "S".to_string(),
                base_y: 0.0,
                height: 200.0,
                messages: vec![MessageLayout {
                    source: "A".to_string(),
                    destination: "Gone".to_string(),
                    message: String::new(),
                    kind: MessageType::Asynchronous,
                    start_position: Some(Point::new(60.0, 120.0)),
                    end_position: None,
                    direction_right: false,
                }],
            }],
        }
    }

    #[test]
    fn test_json_shape() {
        let exporter = JsonExporter::new(&ExportConfig::new(false));
        let value: Value = serde_json::from_str(&exporter.export(&context()).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "name": null,
                "actors": [{"name": "A", "description": "", "position": {"x": 0.0, "y": 0.0}}],
                "objects": [],
                "sequences": [{
                    "name": "S",
                    "baseY": 0.0,
                    "height": 200.0,
                    "messages": [{
                        "source": "A",
                        "destination": "Gone",
                        "message": "",
                        "type": "asynchronous",
                        "startPosition": {"x": 60.0, "y": 120.0},
                        "endPosition": null,
                        "directionRight": false
                    }]
                }]
            })
        );
    }

    #[test]
    fn test_pretty_output() {
        let compact = JsonExporter::new(&ExportConfig::new(false))
            .export(&context())
            .unwrap();
        let pretty = JsonExporter::new(&ExportConfig::default())
            .export(&context())
            .unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains("\n  \"actors\""));
    }

    #[test]
    fn test_writer_matches_string() {
        let exporter = JsonExporter::new(&ExportConfig::default());
        let mut buffer = Vec::new();
        exporter.export_to_writer(&context(), &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            exporter.export(&context()).unwrap()
        );
    }
}
