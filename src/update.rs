//! Update function for the Elm-style architecture
//!
//! All state transformations flow through [`update`]. Semantic actions go
//! through the mutation engine and only replace the text when it succeeds;
//! raw text edits are committed as typed.

use crate::commands::Cmd;
use crate::ingest::{ingest_image, set_background_reference};
use crate::messages::Msg;
use crate::model::{AppModel, Diagnostic};
use crate::mutation::{
    delete_element, insert_device_group, insert_sensor_pair, update_position, EditError,
};
use crate::session::DEFAULT_YAML;

/// Apply one message to the model
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let _span = tracing::debug_span!("update", msg = msg.name()).entered();
    tracing::debug!(target: "message", "processing");

    match msg {
        Msg::TextEdited(text) => {
            model.set_text(text);
            Some(Cmd::commit())
        }

        Msg::MoveElement { address, left, top } => {
            let result = update_position(&model.text, address, &left, &top);
            apply_edit(model, result)
        }

        Msg::AddSensor { floor, id } => {
            let result = insert_sensor_pair(&model.text, &floor, &id);
            apply_edit(model, result)
        }

        Msg::AddHumidifierGroup { floor } => {
            let result =
                insert_device_group(&model.text, &floor, &model.config.humidifier_positions);
            apply_edit(model, result)
        }

        Msg::DeleteElement(target) => {
            let result = delete_element(&model.text, &target);
            if result.is_ok() {
                // Indices after the deleted element have shifted
                model.dragging = None;
            }
            apply_edit(model, result)
        }

        Msg::ImageDropped { bytes, filename } => {
            match ingest_image(&bytes, &filename, &model.config.image_base) {
                Ok(image) => {
                    let text = set_background_reference(&model.text, &image.reference);
                    model.background_image = Some(image.data_url);
                    model.set_text(text);
                    Some(Cmd::commit())
                }
                Err(err) => {
                    tracing::warn!("Rejected dropped image {}: {}", filename, err);
                    model.diagnostic = Some(Diagnostic::Ingest(err));
                    Some(Cmd::Redraw)
                }
            }
        }

        Msg::SetPlaceholders(show) => set_placeholders(model, show),

        Msg::TogglePlaceholders => {
            let show = !model.show_placeholders;
            set_placeholders(model, show)
        }

        Msg::DragStarted(address) => {
            model.dragging = Some(address);
            Some(Cmd::Redraw)
        }

        Msg::DragEnded => model.dragging.take().map(|_| Cmd::Redraw),

        Msg::ResetDocument => {
            model.background_image = None;
            model.dragging = None;
            model.set_text(DEFAULT_YAML.to_string());
            Some(Cmd::commit())
        }
    }
}

/// Commit the engine's output, or record why there is none
fn apply_edit(model: &mut AppModel, result: Result<String, EditError>) -> Option<Cmd> {
    match result {
        Ok(text) => {
            model.set_text(text);
            Some(Cmd::commit())
        }
        Err(err) => {
            tracing::warn!("Edit not applied: {}", err);
            model.diagnostic = Some(Diagnostic::Edit(err));
            Some(Cmd::Redraw)
        }
    }
}

fn set_placeholders(model: &mut AppModel, show: bool) -> Option<Cmd> {
    if model.show_placeholders == show {
        return None;
    }
    model.show_placeholders = show;
    Some(Cmd::commit())
}
