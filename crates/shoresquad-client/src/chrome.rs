//! UI chrome state: the shared modal, the mobile nav menu and lazily loaded
//! images.
//!
//! These types only hold state. Commands in [`crate::commands::ui`] drive
//! them and tell the frontend what changed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

/// What the single modal is currently being used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalPurpose {
    CreateCrew,
    ScheduleEvent,
}

impl ModalPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CreateCrew => "Create New Crew",
            Self::ScheduleEvent => "Schedule Cleanup Event",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewForm {
    pub name: String,
    pub location: String,
}

/// `crew_id` holds the selected option value, empty when none is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventForm {
    pub title: String,
    pub date: String,
    pub crew_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModalForm {
    Crew(CrewForm),
    Event(EventForm),
}

impl ModalForm {
    fn blank(purpose: ModalPurpose) -> Self {
        match purpose {
            ModalPurpose::CreateCrew => Self::Crew(CrewForm::default()),
            ModalPurpose::ScheduleEvent => Self::Event(EventForm::default()),
        }
    }

    /// Set a field by its input id. Returns `false` when the current form
    /// has no such field.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match (self, field) {
            (Self::Crew(f), "crewName") => &mut f.name,
            (Self::Crew(f), "crewLocation") => &mut f.location,
            (Self::Event(f), "eventTitle") => &mut f.title,
            (Self::Event(f), "eventDate") => &mut f.date,
            (Self::Event(f), "eventCrew") => &mut f.crew_id,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct Modal {
    visible: bool,
    purpose: Option<ModalPurpose>,
    form: Option<ModalForm>,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the modal for `purpose` with a blank form of the matching kind.
    pub fn open(&mut self, purpose: ModalPurpose) {
        self.visible = true;
        self.purpose = Some(purpose);
        self.form = Some(ModalForm::blank(purpose));
    }

    /// Hide the modal and reset its fields. Returns whether it was visible.
    pub fn close(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        if let Some(purpose) = self.purpose {
            self.form = Some(ModalForm::blank(purpose));
        }
        was_visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn purpose(&self) -> Option<ModalPurpose> {
        self.purpose
    }

    pub fn title(&self) -> Option<&'static str> {
        self.purpose.map(|p| p.title())
    }

    pub fn form(&self) -> Option<&ModalForm> {
        self.form.as_ref()
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        if !self.visible {
            return false;
        }
        match self.form.as_mut() {
            Some(form) => form.set_field(field, value),
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Flip the menu. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

// ---------------------------------------------------------------------------
// Lazy images
// ---------------------------------------------------------------------------

/// Images whose real `src` is deferred until they scroll into view.
#[derive(Debug, Clone)]
pub struct LazyImages {
    supported: bool,
    pending: HashMap<String, String>,
}

impl LazyImages {
    /// `supported` says whether the host can report visibility changes.
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            pending: HashMap::new(),
        }
    }

    /// Start watching an image. Without visibility support the image is
    /// loaded straight away: the returned source should be applied now.
    pub fn observe(&mut self, id: impl Into<String>, data_src: impl Into<String>) -> Option<String> {
        let data_src = data_src.into();
        if !self.supported {
            return Some(data_src);
        }
        self.pending.insert(id.into(), data_src);
        None
    }

    /// The image came into view: stop watching it and return its source.
    pub fn intersect(&mut self, id: &str) -> Option<String> {
        self.pending.remove(id)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Default for LazyImages {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_open_sets_title_and_blank_form() {
        let mut modal = Modal::new();
        assert!(!modal.is_visible());
        assert_eq!(modal.title(), None);

        modal.open(ModalPurpose::ScheduleEvent);
        assert!(modal.is_visible());
        assert_eq!(modal.title(), Some("Schedule Cleanup Event"));
        assert_eq!(modal.form(), Some(&ModalForm::Event(EventForm::default())));
    }

    #[test]
    fn modal_close_resets_fields() {
        let mut modal = Modal::new();
        modal.open(ModalPurpose::CreateCrew);
        assert!(modal.set_field("crewName", "Tide Turners"));
        assert!(!modal.set_field("eventTitle", "wrong form"));

        assert!(modal.close());
        assert!(!modal.is_visible());
        assert_eq!(modal.form(), Some(&ModalForm::Crew(CrewForm::default())));
        assert!(!modal.close());
    }

    #[test]
    fn fields_cannot_be_set_on_hidden_modal() {
        let mut modal = Modal::new();
        assert!(!modal.set_field("crewName", "x"));
        modal.open(ModalPurpose::CreateCrew);
        modal.close();
        assert!(!modal.set_field("crewName", "x"));
    }

    #[test]
    fn switching_purpose_swaps_form() {
        let mut modal = Modal::new();
        modal.open(ModalPurpose::ScheduleEvent);
        modal.set_field("eventTitle", "Sweep");
        modal.close();

        modal.open(ModalPurpose::CreateCrew);
        assert_eq!(modal.title(), Some("Create New Crew"));
        assert!(matches!(modal.form(), Some(ModalForm::Crew(_))));
    }

    #[test]
    fn nav_toggle_and_close() {
        let mut nav = NavMenu::default();
        assert!(nav.toggle());
        assert!(!nav.toggle());
        nav.toggle();
        nav.close();
        assert!(!nav.is_open());
    }

    #[test]
    fn lazy_image_loads_once_on_intersect() {
        let mut images = LazyImages::new(true);
        assert_eq!(images.observe("hero", "/img/hero.jpg"), None);
        assert_eq!(images.pending(), 1);

        assert_eq!(images.intersect("hero").as_deref(), Some("/img/hero.jpg"));
        assert_eq!(images.intersect("hero"), None);
        assert_eq!(images.pending(), 0);
    }

    #[test]
    fn lazy_images_load_eagerly_without_support() {
        let mut images = LazyImages::new(false);
        assert_eq!(
            images.observe("hero", "/img/hero.jpg").as_deref(),
            Some("/img/hero.jpg")
        );
        assert_eq!(images.pending(), 0);
    }
}
