//! Layout transformation from a document to a [`LayoutContext`].
//!
//! Participants are laid out left to right, Actors first and then Objects,
//! in declaration order. Sequences stack vertically; inside a sequence every
//! message takes the next horizontal lane below the participant boxes.

mod context;

pub use context::{LayoutContext, MessageLayout, MessageType, ParticipantLayout, SequenceLayout};

use log::{debug, info};

use parley_parser::ast::{Document, Identifier, Message, Node, StringValue};

use crate::{config::LayoutConfig, geometry::Point};

/// Compute the layout context of `document`.
///
/// The transformation is pure: the same document and configuration always
/// produce the same context.
pub fn transform(document: &Document, config: &LayoutConfig) -> LayoutContext {
    info!("Computing layout");

    let stride = config.participant_width() + config.participant_margin();
    let place = |index: usize, node: &Node| ParticipantLayout {
        name: name_of(node.identifier()),
        description: node.description().to_string(),
        position: Point::new(index as f32 * stride, 0.0),
    };

    let actors: Vec<_> = document
        .actors()
        .enumerate()
        .map(|(index, node)| place(index, node))
        .collect();
    let objects: Vec<_> = document
        .objects()
        .enumerate()
        .map(|(index, node)| place(actors.len() + index, node))
        .collect();

    let mut sequences: Vec<SequenceLayout> = Vec::new();
    for node in document.sequences() {
        let base_y = sequences.last().map_or(0.0, |previous| {
            previous.base_y + previous.height + config.participant_height()
        });
        let sequence = layout_sequence(node, base_y, &actors, &objects, config);
        debug!(
            name = sequence.name.as_str(),
            base_y = sequence.base_y,
            height = sequence.height;
            "Sequence placed"
        );
        sequences.push(sequence);
    }

    debug!(
        actors = actors.len(),
        objects = objects.len(),
        sequences = sequences.len();
        "Layout computed"
    );

    LayoutContext {
        name: document.title().map(str::to_string),
        actors,
        objects,
        sequences,
    }
}

fn layout_sequence(
    node: &Node,
    base_y: f32,
    actors: &[ParticipantLayout],
    objects: &[ParticipantLayout],
    config: &LayoutConfig,
) -> SequenceLayout {
    let lane = config.message_lane_height();
    let mut cursor = config.participant_height() + lane / 2.0;

    let messages = node
        .messages()
        .map(|(message_node, message)| {
            let y = cursor;
            cursor += lane;
            layout_message(message_node, message, y, actors, objects, config)
        })
        .collect();

    SequenceLayout {
        name: name_of(node.identifier()),
        base_y,
        height: cursor,
        messages,
    }
}

fn layout_message(
    node: &Node,
    message: &Message,
    y: f32,
    actors: &[ParticipantLayout],
    objects: &[ParticipantLayout],
    config: &LayoutConfig,
) -> MessageLayout {
    let anchor = |endpoint: Option<&Identifier>| {
        let name = endpoint?.name();
        actors
            .iter()
            .chain(objects)
            .find(|participant| participant.name == name)
            .map(|participant| {
                participant
                    .position
                    .with_x_offset(config.participant_width() / 2.0)
                    .with_y(y)
            })
    };

    let start_position = anchor(message.source());
    let end_position = anchor(message.destination());
    let direction_right = match (start_position, end_position) {
        (Some(start), Some(end)) => end.x() > start.x(),
        _ => false,
    };

    MessageLayout {
        source: name_of(message.source()),
        destination: name_of(message.destination()),
        message: node
            .string()
            .map(StringValue::value)
            .unwrap_or_default()
            .to_string(),
        kind: message.kind().into(),
        start_position,
        end_position,
        direction_right,
    }
}

fn name_of(identifier: Option<&Identifier>) -> String {
    identifier
        .map(|identifier| identifier.name().to_string())
        .unwrap_or_default()
}
