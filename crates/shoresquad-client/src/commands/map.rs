use tracing::info;

use crate::error::CommandError;
use crate::state::AppHandle;

pub const MSG_SEARCHING_BEACHES: &str = "Searching for nearby beaches... 🏖️";

/// Search for beaches near the session location. The search itself cannot
/// fail; the user sees one toast when it starts and one when it ends.
pub async fn find_nearby_beaches(app: &AppHandle) -> Result<usize, CommandError> {
    let near = app.state()?.location;
    app.notifier().info(MSG_SEARCHING_BEACHES);

    let found = app.services().places.find_nearby_beaches(near).await;

    app.notifier()
        .success(format!("Found {found} beaches nearby! 🎉"));
    info!(found, located = near.is_some(), "beach search finished");
    Ok(found)
}
