//! Layout context handed to the renderer.
//!
//! Plain serializable data. Keys serialize in camelCase and the message kind
//! is written under `type`.

use serde::Serialize;

use parley_parser::ast::MessageKind;

use crate::geometry::Point;

/// Everything a template needs to draw a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutContext {
    /// Document title.
    pub name: Option<String>,
    pub actors: Vec<ParticipantLayout>,
    pub objects: Vec<ParticipantLayout>,
    pub sequences: Vec<SequenceLayout>,
}

impl LayoutContext {
    /// Actors followed by Objects.
    pub fn participants(&self) -> impl Iterator<Item = &ParticipantLayout> {
        self.actors.iter().chain(self.objects.iter())
    }
}

/// A placed Actor or Object box.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantLayout {
    pub name: String,
    pub description: String,
    /// Top-left corner of the box.
    pub position: Point,
}

/// A sequence block and its messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceLayout {
    pub name: String,
    pub base_y: f32,
    pub height: f32,
    pub messages: Vec<MessageLayout>,
}

/// A message arrow between two participant lifelines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageLayout {
    pub source: String,
    pub destination: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    /// `None` when the source is not a participant.
    pub start_position: Option<Point>,
    /// `None` when the destination is not a participant.
    pub end_position: Option<Point>,
    pub direction_right: bool,
}

/// Serialized form of [`MessageKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Synchronous,
    Asynchronous,
    Reply,
}

impl From<MessageKind> for MessageType {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Synchronous => MessageType::Synchronous,
            MessageKind::Asynchronous => MessageType::Asynchronous,
            MessageKind::Reply => MessageType::Reply,
        }
    }
}
