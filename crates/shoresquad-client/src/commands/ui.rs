//! Modal, navigation, keyboard and image-loading handlers.

use tracing::debug;

use crate::chrome::{ModalForm, ModalPurpose};
use crate::commands::{crews, scheduling};
use crate::error::CommandError;
use crate::events::{
    ImagePayload, ModalPayload, NavPayload, Region, ScrollPayload, EVENT_IMAGE_LOADED,
    EVENT_MODAL_CHANGED, EVENT_NAV_CHANGED, EVENT_SCROLL_TO,
};
use crate::state::AppHandle;

pub const KEY_ESCAPE: &str = "Escape";

/// What a submitted modal produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Crew(shoresquad_store::Crew),
    Event(shoresquad_store::Event),
}

pub(crate) fn emit_modal(app: &AppHandle) -> Result<(), CommandError> {
    let payload = {
        let guard = app.state()?;
        ModalPayload {
            visible: guard.modal.is_visible(),
            title: guard.modal.title(),
        }
    };
    app.emit(EVENT_MODAL_CHANGED, payload);
    Ok(())
}

/// Open the shared modal for `purpose`, swapping in the matching form.
pub fn open_modal(app: &AppHandle, purpose: ModalPurpose) -> Result<(), CommandError> {
    let form_html = {
        let mut guard = app.state()?;
        guard.modal.open(purpose);
        guard.render(Region::ModalForm)
    };
    app.emit_region(Region::ModalForm, form_html);
    emit_modal(app)?;
    debug!(?purpose, "modal opened");
    Ok(())
}

/// Hide the modal and reset its fields. Closing a hidden modal does nothing.
pub fn close_modal(app: &AppHandle) -> Result<(), CommandError> {
    let was_visible = app.state()?.modal.close();
    if was_visible {
        emit_modal(app)?;
        debug!("modal closed");
    }
    Ok(())
}

/// Record a form input change. Returns `false` if the open form has no
/// field with that id.
pub fn set_modal_field(app: &AppHandle, field: &str, value: &str) -> Result<bool, CommandError> {
    Ok(app.state()?.modal.set_field(field, value))
}

/// Submit whichever form the modal currently shows.
pub fn submit_modal(app: &AppHandle) -> Result<Submitted, CommandError> {
    let form = {
        let guard = app.state()?;
        if !guard.modal.is_visible() {
            return Err(CommandError::NoOpenForm);
        }
        guard.modal.form().cloned().ok_or(CommandError::NoOpenForm)?
    };

    match form {
        ModalForm::Crew(f) => crews::create_crew(app, &f.name, &f.location).map(Submitted::Crew),
        ModalForm::Event(f) => {
            scheduling::create_event(app, &f.title, &f.date, &f.crew_id).map(Submitted::Event)
        }
    }
}

/// Keyboard shortcut handler. Escape closes the modal.
pub fn handle_key(app: &AppHandle, key: &str) -> Result<(), CommandError> {
    if key == KEY_ESCAPE {
        close_modal(app)?;
    }
    Ok(())
}

/// A click landed on the modal. Only clicks on the backdrop itself, not
/// inside the dialog body, close it.
pub fn click_modal(app: &AppHandle, on_backdrop: bool) -> Result<(), CommandError> {
    if on_backdrop {
        close_modal(app)?;
    }
    Ok(())
}

pub fn toggle_nav(app: &AppHandle) -> Result<bool, CommandError> {
    let open = app.state()?.nav.toggle();
    app.emit(EVENT_NAV_CHANGED, NavPayload { open });
    Ok(open)
}

/// A nav link was followed; the mobile menu closes.
pub fn select_nav_link(app: &AppHandle) -> Result<(), CommandError> {
    app.state()?.nav.close();
    app.emit(EVENT_NAV_CHANGED, NavPayload { open: false });
    Ok(())
}

/// The hero "start" button scrolls the page to the map.
pub fn start(app: &AppHandle) {
    app.emit(
        EVENT_SCROLL_TO,
        ScrollPayload {
            target: Region::Map.element_id(),
        },
    );
}

/// Register an image whose source is deferred until it becomes visible.
pub fn observe_image(app: &AppHandle, id: &str, data_src: &str) -> Result<(), CommandError> {
    let eager = app.state()?.lazy_images.observe(id, data_src);
    if let Some(src) = eager {
        app.emit(
            EVENT_IMAGE_LOADED,
            ImagePayload {
                id: id.to_string(),
                src,
            },
        );
    }
    Ok(())
}

/// An observed image scrolled into view: load it and stop observing.
pub fn image_visible(app: &AppHandle, id: &str) -> Result<bool, CommandError> {
    let src = app.state()?.lazy_images.intersect(id);
    match src {
        Some(src) => {
            app.emit(
                EVENT_IMAGE_LOADED,
                ImagePayload {
                    id: id.to_string(),
                    src,
                },
            );
            Ok(true)
        }
        None => Ok(false),
    }
}
