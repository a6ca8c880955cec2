//! Events pushed from the app to whatever frontend hosts it.
//!
//! A frontend receives a named event plus a JSON payload and applies it to
//! its own interface: replacing the markup of a region, showing or removing
//! a toast, toggling the modal or nav menu.

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use shoresquad_shared::Severity;

pub const EVENT_REGION_UPDATED: &str = "region-updated";
pub const EVENT_TOAST_SHOWN: &str = "toast-shown";
pub const EVENT_TOAST_FADING: &str = "toast-fading";
pub const EVENT_TOAST_REMOVED: &str = "toast-removed";
pub const EVENT_MODAL_CHANGED: &str = "modal-changed";
pub const EVENT_NAV_CHANGED: &str = "nav-changed";
pub const EVENT_SCROLL_TO: &str = "scroll-to";
pub const EVENT_IMAGE_LOADED: &str = "image-loaded";

/// A part of the page that is re-rendered as a whole.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    CrewList,
    EventList,
    Map,
    WeatherCard,
    ModalForm,
}

impl Region {
    /// DOM id of the container the markup belongs in.
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::CrewList => "crewList",
            Self::EventList => "eventsContainer",
            Self::Map => "map",
            Self::WeatherCard => "weatherCard",
            Self::ModalForm => "crewForm",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionPayload {
    pub region: Region,
    pub element_id: &'static str,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToastPayload {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub color: &'static str,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToastIdPayload {
    pub id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModalPayload {
    pub visible: bool,
    pub title: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPayload {
    pub open: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrollPayload {
    pub target: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagePayload {
    pub id: String,
    pub src: String,
}

#[derive(Debug, Error)]
#[error("Frontend rejected event: {0}")]
pub struct FrontendError(pub String);

/// The receiving side of app events.
pub trait Frontend: Send + Sync {
    fn emit(&self, event: &str, payload: Value) -> Result<(), FrontendError>;
}

pub fn emit_event<S: Serialize>(frontend: &dyn Frontend, event: &str, payload: S) {
    let payload = match serde_json::to_value(payload) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(event, error = %e, "Failed to serialize event payload");
            return;
        }
    };
    if let Err(e) = frontend.emit(event, payload) {
        tracing::error!(event, error = %e, "Failed to emit event");
    }
}

/// Frontend that keeps every event it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Payloads of every event with the given name.
    pub fn named(&self, event: &str) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter(|(name, _)| name == event)
            .map(|(_, payload)| payload)
            .collect()
    }

    /// Markup most recently rendered into `region`.
    pub fn last_region(&self, region: Region) -> Option<String> {
        let wanted = serde_json::to_value(region).ok()?;
        self.named(EVENT_REGION_UPDATED)
            .into_iter()
            .rev()
            .find(|p| p["region"] == wanted)
            .and_then(|p| p["html"].as_str().map(str::to_string))
    }

    /// `(severity, message)` for every toast shown so far.
    pub fn toasts(&self) -> Vec<(String, String)> {
        self.named(EVENT_TOAST_SHOWN)
            .into_iter()
            .map(|p| {
                (
                    p["severity"].as_str().unwrap_or_default().to_string(),
                    p["message"].as_str().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }
}

impl Frontend for RecordingFrontend {
    fn emit(&self, event: &str, payload: Value) -> Result<(), FrontendError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|e| FrontendError(format!("Lock poisoned: {e}")))?;
        guard.push((event.to_string(), payload));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(Region::CrewList).unwrap(),
            serde_json::json!("crew-list")
        );
        assert_eq!(Region::EventList.element_id(), "eventsContainer");
    }

    #[test]
    fn recording_frontend_tracks_last_region() {
        let frontend = RecordingFrontend::new();
        for html in ["<p>one</p>", "<p>two</p>"] {
            emit_event(
                &frontend,
                EVENT_REGION_UPDATED,
                RegionPayload {
                    region: Region::Map,
                    element_id: Region::Map.element_id(),
                    html: html.to_string(),
                },
            );
        }

        assert_eq!(frontend.last_region(Region::Map).as_deref(), Some("<p>two</p>"));
        assert_eq!(frontend.last_region(Region::CrewList), None);
        assert_eq!(frontend.events().len(), 2);
    }
}
