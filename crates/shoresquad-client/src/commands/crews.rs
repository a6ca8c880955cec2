use tracing::info;

use shoresquad_store::Crew;

use crate::chrome::ModalPurpose;
use crate::commands::report_store_error;
use crate::commands::ui::{emit_modal, open_modal};
use crate::error::CommandError;
use crate::events::Region;
use crate::state::AppHandle;

/// Show the modal with the crew form.
pub fn open_crew_modal(app: &AppHandle) -> Result<(), CommandError> {
    open_modal(app, ModalPurpose::CreateCrew)
}

/// Create a crew, re-render the crew list and close the modal.
///
/// On a validation or storage failure nothing changes and the modal stays
/// open.
pub fn create_crew(app: &AppHandle, name: &str, location: &str) -> Result<Crew, CommandError> {
    let (crew, html, modal_closed) = {
        let mut guard = app.state()?;
        let crew = match guard.store.create_crew(name, location) {
            Ok(crew) => crew,
            Err(e) => {
                drop(guard);
                report_store_error(app, &e);
                return Err(e.into());
            }
        };
        let html = guard.render(Region::CrewList);
        let modal_closed = guard.modal.close();
        (crew, html, modal_closed)
    };

    app.emit_region(Region::CrewList, html);
    if modal_closed {
        emit_modal(app)?;
    }
    app.notifier()
        .success(format!("Crew \"{}\" created! 🎉", crew.name));

    info!(crew_id = %crew.id, "crew list refreshed");
    Ok(crew)
}
