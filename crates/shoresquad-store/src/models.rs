//! Domain records persisted in local storage.
//!
//! Field names are camelCase on the wire so stored data matches the records
//! the web frontend reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shoresquad_shared::{CrewId, EventId};

// ---------------------------------------------------------------------------
// Crew
// ---------------------------------------------------------------------------

/// A named, located group of participants that can sponsor events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Crew {
    pub id: CrewId,
    pub name: String,
    /// Free-form place name.
    pub location: String,
    /// Member names in join order, unique.
    pub members: Vec<String>,
    /// Always `members.len()`.
    pub member_count: usize,
    /// Display date set at creation ("Jun 1").
    pub created: String,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
}

/// A scheduled cleanup tied to one crew.
///
/// `crew` and `location` are copies taken when the event was scheduled, not
/// live references to the crew record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub crew: String,
    pub location: String,
    /// Participant names in join order, unique.
    pub participants: Vec<String>,
    /// Always `participants.len()`.
    pub participant_count: usize,
    pub status: EventStatus,
}

impl Event {
    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    /// Append `name` to the roster unless already present. Returns whether
    /// the roster changed.
    pub(crate) fn add_participant(&mut self, name: &str) -> bool {
        if self.has_participant(name) {
            return false;
        }
        self.participants.push(name.to_string());
        self.participant_count = self.participants.len();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event {
            id: EventId(2),
            title: "Sunset Cleanup".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            crew: "Tide Turners".into(),
            location: "East Coast Park".into(),
            participants: vec!["Beach Warrior".into()],
            participant_count: 1,
            status: EventStatus::Upcoming,
        }
    }

    #[test]
    fn event_json_shape() {
        let json = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["date"], "2024-06-01");
        assert_eq!(json["participantCount"], 1);
        assert_eq!(json["status"], "upcoming");
    }

    #[test]
    fn crew_reads_stored_json() {
        let crew: Crew = serde_json::from_str(
            r#"{"id":1717200000000,"name":"Tide Turners","location":"East Coast Park",
                "members":["Beach Warrior"],"memberCount":1,"created":"Jun 1"}"#,
        )
        .unwrap();
        assert_eq!(crew.id, CrewId(1717200000000));
        assert_eq!(crew.member_count, 1);
        assert_eq!(crew.members, vec!["Beach Warrior"]);
    }

    #[test]
    fn add_participant_is_idempotent() {
        let mut event = sample_event();
        assert!(event.add_participant("Kai"));
        assert!(!event.add_participant("Kai"));
        assert!(!event.add_participant("Beach Warrior"));
        assert_eq!(event.participants, vec!["Beach Warrior", "Kai"]);
        assert_eq!(event.participant_count, 2);
    }
}
