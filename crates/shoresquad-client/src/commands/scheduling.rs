use tracing::{debug, info};

use shoresquad_shared::EventId;
use shoresquad_store::{Event, JoinOutcome};

use crate::chrome::ModalPurpose;
use crate::commands::report_store_error;
use crate::commands::ui::{emit_modal, open_modal};
use crate::error::CommandError;
use crate::events::Region;
use crate::state::AppHandle;

/// Show the modal with the scheduling form, listing the current crews.
pub fn open_event_modal(app: &AppHandle) -> Result<(), CommandError> {
    open_modal(app, ModalPurpose::ScheduleEvent)
}

/// Schedule an event for the crew whose id is `crew_id` (a form value).
pub fn create_event(
    app: &AppHandle,
    title: &str,
    date: &str,
    crew_id: &str,
) -> Result<Event, CommandError> {
    let (event, html, modal_closed) = {
        let mut guard = app.state()?;
        let event = match guard.store.create_event(title, date, crew_id) {
            Ok(event) => event,
            Err(e) => {
                drop(guard);
                report_store_error(app, &e);
                return Err(e.into());
            }
        };
        let html = guard.render(Region::EventList);
        let modal_closed = guard.modal.close();
        (event, html, modal_closed)
    };

    app.emit_region(Region::EventList, html);
    if modal_closed {
        emit_modal(app)?;
    }
    app.notifier()
        .success(format!("Event \"{}\" scheduled! 📅", event.title));

    info!(event_id = %event.id, "event list refreshed");
    Ok(event)
}

/// Join an event as the current user. Joining twice, or joining an event
/// that does not exist, changes nothing and shows nothing.
pub fn join_event(app: &AppHandle, event_id: EventId) -> Result<JoinOutcome, CommandError> {
    let (outcome, html) = {
        let mut guard = app.state()?;
        let outcome = match guard.store.join_event(event_id) {
            Ok(outcome) => outcome,
            Err(e) => {
                drop(guard);
                report_store_error(app, &e);
                return Err(e.into());
            }
        };
        let html = matches!(outcome, JoinOutcome::Joined(_)).then(|| guard.render(Region::EventList));
        (outcome, html)
    };

    match (&outcome, html) {
        (JoinOutcome::Joined(event), Some(html)) => {
            app.emit_region(Region::EventList, html);
            app.notifier()
                .success(format!("You joined \"{}\"! 🌊", event.title));
        }
        _ => debug!(event_id = %event_id, ?outcome, "join had no effect"),
    }

    Ok(outcome)
}

/// Join from a raw button value such as `data-event-id`.
pub fn join_event_by_value(app: &AppHandle, raw_id: &str) -> Result<JoinOutcome, CommandError> {
    let event_id: EventId = raw_id
        .parse()
        .map_err(|_| CommandError::InvalidId(raw_id.to_string()))?;
    join_event(app, event_id)
}
