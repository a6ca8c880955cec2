//! The local community data store.
//!
//! [`CommunityStore`] owns the crew and event lists for one session and
//! mirrors them to a [`Persistence`] adapter. Every mutation writes the
//! complete next list to storage first and only then commits it in memory,
//! so a failed write leaves both sides unchanged.

use chrono::NaiveDate;
use shoresquad_shared::constants::{CREWS_KEY, EVENTS_KEY};
use shoresquad_shared::format::{parse_iso_date, today_short};
use shoresquad_shared::{CrewId, EventId, ValidationError};
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::ids::IdSequence;
use crate::models::{Crew, Event, EventStatus};
use crate::persistence::Persistence;

/// Result of a join request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The participant was added; carries the updated event.
    Joined(Event),
    /// The participant was already on the roster. Nothing changed.
    AlreadyJoined,
    /// No event has the requested id. Nothing changed.
    UnknownEvent,
}

pub struct CommunityStore {
    persistence: Persistence,
    crews: Vec<Crew>,
    events: Vec<Event>,
    current_user: String,
    ids: IdSequence,
}

impl CommunityStore {
    /// Create an empty store. Call [`load_all`](Self::load_all) to pick up
    /// previously saved records.
    pub fn new(persistence: Persistence, current_user: impl Into<String>) -> Self {
        Self {
            persistence,
            crews: Vec::new(),
            events: Vec::new(),
            current_user: current_user.into(),
            ids: IdSequence::new(),
        }
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    // ------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------

    /// Replace the in-memory lists with the stored ones.
    ///
    /// Missing records load as empty lists. Each record is decoded on its
    /// own: a malformed one leaves only its own list empty and is returned
    /// as an error, while the other list still loads. The malformed text is
    /// not touched until the next mutation of that list overwrites it.
    pub fn load_all(&mut self) -> Result<()> {
        self.crews.clear();
        self.events.clear();

        let crews = self.persistence.load_json::<Vec<Crew>>(CREWS_KEY);
        let events = self.persistence.load_json::<Vec<Event>>(EVENTS_KEY);
        let mut first_err = None;

        match crews {
            Ok(crews) => {
                let mut crews = crews.unwrap_or_default();
                for crew in &mut crews {
                    if crew.member_count != crew.members.len() {
                        debug!(crew_id = %crew.id, "repairing stored member count");
                        crew.member_count = crew.members.len();
                    }
                }
                match self.observe_ids(crews.iter().map(|c| c.id.0), CREWS_KEY) {
                    Ok(()) => self.crews = crews,
                    Err(e) => first_err = first_err.or(Some(e)),
                }
            }
            Err(e) => {
                warn!(key = CREWS_KEY, error = %e, "stored crews could not be read");
                first_err = first_err.or(Some(e));
            }
        }

        match events {
            Ok(events) => {
                let mut events = events.unwrap_or_default();
                for event in &mut events {
                    if event.participant_count != event.participants.len() {
                        debug!(event_id = %event.id, "repairing stored participant count");
                        event.participant_count = event.participants.len();
                    }
                }
                match self.observe_ids(events.iter().map(|e| e.id.0), EVENTS_KEY) {
                    Ok(()) => self.events = events,
                    Err(e) => first_err = first_err.or(Some(e)),
                }
            }
            Err(e) => {
                warn!(key = EVENTS_KEY, error = %e, "stored events could not be read");
                first_err = first_err.or(Some(e));
            }
        }

        info!(
            crews = self.crews.len(),
            events = self.events.len(),
            "loaded community data"
        );

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Feed stored ids to the sequence. An id with no successor cannot be
    /// followed by a newer record, so the whole list is rejected.
    fn observe_ids(&mut self, ids: impl Iterator<Item = i64>, key: &str) -> Result<()> {
        let mut max = None;
        for id in ids {
            if id == i64::MAX {
                warn!(key, id, "stored id leaves no room for newer records");
                return Err(StoreError::IdOutOfRange {
                    key: key.to_string(),
                    id,
                });
            }
            max = max.max(Some(id));
        }
        if let Some(id) = max {
            self.ids.observe(id);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Crews in creation order.
    pub fn list_crews(&self) -> &[Crew] {
        &self.crews
    }

    /// Events in creation order.
    pub fn list_events(&self) -> &[Event] {
        &self.events
    }

    pub fn find_crew(&self, id: CrewId) -> Option<&Crew> {
        self.crews.iter().find(|c| c.id == id)
    }

    pub fn find_event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Create a crew with the current user as its only member.
    pub fn create_crew(&mut self, name: &str, location: &str) -> Result<Crew> {
        let name = name.trim();
        let location = location.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if location.is_empty() {
            return Err(ValidationError::MissingField("location").into());
        }

        let crew = Crew {
            id: CrewId(self.ids.next_id()?),
            name: name.to_string(),
            location: location.to_string(),
            members: vec![self.current_user.clone()],
            member_count: 1,
            created: today_short(),
        };

        let mut next = self.crews.clone();
        next.push(crew.clone());
        self.persistence.save(CREWS_KEY, &next)?;
        self.crews = next;

        info!(crew_id = %crew.id, name = %crew.name, "Crew created");
        Ok(crew)
    }

    /// Schedule an event from raw form values.
    ///
    /// `crew_id` is the selected crew option; it must name an existing crew.
    pub fn create_event(&mut self, title: &str, date: &str, crew_id: &str) -> Result<Event> {
        let title = title.trim();
        let crew_id = crew_id.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }
        if date.trim().is_empty() {
            return Err(ValidationError::MissingField("date").into());
        }
        if crew_id.is_empty() {
            return Err(ValidationError::MissingField("crew").into());
        }

        let date = parse_iso_date(date)?;
        let crew_id: CrewId = crew_id
            .parse()
            .map_err(|_| ValidationError::InvalidCrewId(crew_id.to_string()))?;

        self.schedule_event(title, date, crew_id)
    }

    /// Schedule an event for an already-parsed date and crew.
    ///
    /// The crew's current name and location are copied into the event.
    pub fn schedule_event(&mut self, title: &str, date: NaiveDate, crew_id: CrewId) -> Result<Event> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }
        let (crew_name, crew_location) = self
            .find_crew(crew_id)
            .map(|c| (c.name.clone(), c.location.clone()))
            .ok_or(ValidationError::UnknownCrew(crew_id))?;

        let event = Event {
            id: EventId(self.ids.next_id()?),
            title: title.to_string(),
            date,
            crew: crew_name,
            location: crew_location,
            participants: vec![self.current_user.clone()],
            participant_count: 1,
            status: EventStatus::Upcoming,
        };

        let mut next = self.events.clone();
        next.push(event.clone());
        self.persistence.save(EVENTS_KEY, &next)?;
        self.events = next;

        info!(event_id = %event.id, title = %event.title, crew = %event.crew, "Event scheduled");
        Ok(event)
    }

    // ------------------------------------------------------------------
    // Join
    // ------------------------------------------------------------------

    /// Join an event as the current user.
    pub fn join_event(&mut self, event_id: EventId) -> Result<JoinOutcome> {
        let name = self.current_user.clone();
        self.join_event_as(event_id, &name)
    }

    /// Add `participant` to an event's roster. Joining twice is a no-op.
    pub fn join_event_as(&mut self, event_id: EventId, participant: &str) -> Result<JoinOutcome> {
        let Some(idx) = self.events.iter().position(|e| e.id == event_id) else {
            debug!(event_id = %event_id, "join ignored: unknown event");
            return Ok(JoinOutcome::UnknownEvent);
        };
        if self.events[idx].has_participant(participant) {
            debug!(event_id = %event_id, participant, "join ignored: already on roster");
            return Ok(JoinOutcome::AlreadyJoined);
        }

        let mut next = self.events.clone();
        next[idx].add_participant(participant);
        self.persistence.save(EVENTS_KEY, &next)?;
        self.events = next;

        let event = self.events[idx].clone();
        info!(
            event_id = %event.id,
            participant,
            participants = event.participant_count,
            "Participant joined event"
        );
        Ok(JoinOutcome::Joined(event))
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Give back the persistence adapter, e.g. to reopen it in a new session.
    pub fn into_persistence(self) -> Persistence {
        self.persistence
    }
}

impl std::fmt::Debug for CommunityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommunityStore")
            .field("current_user", &self.current_user)
            .field("crews", &self.crews.len())
            .field("events", &self.events.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValueStore, MemoryStorage};

    const ME: &str = "Beach Warrior";

    fn store() -> CommunityStore {
        CommunityStore::new(Persistence::in_memory(), ME)
    }

    /// Backend whose writes always fail, standing in for a full disk.
    struct FullStorage;

    impl KeyValueStore for FullStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )))
        }
    }

    #[test]
    fn create_crew_adds_current_user() {
        let mut store = store();
        let crew = store.create_crew("Tide Turners", "East Coast Park").unwrap();

        assert_eq!(store.list_crews().len(), 1);
        assert_eq!(crew.members, vec![ME.to_string()]);
        assert_eq!(crew.member_count, 1);
        assert!(!crew.created.is_empty());
    }

    #[test]
    fn create_crew_trims_fields() {
        let mut store = store();
        let crew = store.create_crew("  Tide Turners ", "\tEast Coast Park\n").unwrap();
        assert_eq!(crew.name, "Tide Turners");
        assert_eq!(crew.location, "East Coast Park");
    }

    #[test]
    fn create_crew_rejects_blank_fields() {
        let mut store = store();

        let err = store.create_crew("   ", "East Coast Park").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::MissingField("name"))
        ));

        let err = store.create_crew("Tide Turners", "").unwrap_err();
        assert!(err.is_validation());

        assert!(store.list_crews().is_empty());
    }

    #[test]
    fn ids_increase_in_creation_order() {
        let mut store = store();
        let a = store.create_crew("A", "Here").unwrap();
        let b = store.create_crew("B", "There").unwrap();
        assert!(b.id > a.id);

        let ev = store.create_event("Sweep", "2024-06-01", &a.id.to_string()).unwrap();
        assert!(ev.id.0 > b.id.0);
    }

    #[test]
    fn create_event_copies_crew_fields() {
        let mut store = store();
        let crew = store.create_crew("Tide Turners", "East Coast Park").unwrap();

        let event = store
            .create_event("Sunset Cleanup", "2024-06-01", &crew.id.to_string())
            .unwrap();

        assert_eq!(event.crew, "Tide Turners");
        assert_eq!(event.location, "East Coast Park");
        assert_eq!(event.participants, vec![ME.to_string()]);
        assert_eq!(event.participant_count, 1);
        assert_eq!(event.status, EventStatus::Upcoming);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn create_event_rejects_bad_input() {
        let mut store = store();
        let crew = store.create_crew("Tide Turners", "East Coast Park").unwrap();
        let id = crew.id.to_string();

        let cases = [
            ("", "2024-06-01", id.as_str()),
            ("Sweep", "", id.as_str()),
            ("Sweep", "2024-06-01", ""),
            ("Sweep", "June 1st", id.as_str()),
            ("Sweep", "2024-06-01", "not-a-number"),
            ("Sweep", "2024-06-01", "12345"),
        ];
        for (title, date, crew_id) in cases {
            let err = store.create_event(title, date, crew_id).unwrap_err();
            assert!(err.is_validation(), "{title:?} {date:?} {crew_id:?}: {err}");
        }

        assert!(store.list_events().is_empty());
    }

    #[test]
    fn unknown_crew_is_reported_by_id() {
        let mut store = store();
        let err = store.create_event("Sweep", "2024-06-01", "77").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::UnknownCrew(CrewId(77)))
        ));
    }

    #[test]
    fn join_is_idempotent_per_name() {
        let mut store = store();
        let crew = store.create_crew("Tide Turners", "East Coast Park").unwrap();
        let event = store
            .create_event("Sunset Cleanup", "2024-06-01", &crew.id.to_string())
            .unwrap();

        assert_eq!(store.join_event(event.id).unwrap(), JoinOutcome::AlreadyJoined);

        let outcome = store.join_event_as(event.id, "Kai").unwrap();
        assert!(matches!(outcome, JoinOutcome::Joined(ref e) if e.participant_count == 2));

        for _ in 0..3 {
            assert_eq!(
                store.join_event_as(event.id, "Kai").unwrap(),
                JoinOutcome::AlreadyJoined
            );
        }
        assert_eq!(store.find_event(event.id).unwrap().participant_count, 2);
    }

    #[test]
    fn join_unknown_event_is_a_no_op() {
        let mut store = store();
        assert_eq!(
            store.join_event(EventId(1)).unwrap(),
            JoinOutcome::UnknownEvent
        );
    }

    #[test]
    fn event_keeps_its_own_copy_of_crew_fields() {
        let mut store = store();
        let crew = store.create_crew("Tide Turners", "East Coast Park").unwrap();
        let event = store
            .create_event("Sunset Cleanup", "2024-06-01", &crew.id.to_string())
            .unwrap();
        store.create_crew("Other", "Elsewhere").unwrap();

        assert_eq!(store.find_event(event.id).unwrap().crew, "Tide Turners");
    }

    #[test]
    fn reload_reproduces_lists() {
        let mut store = store();
        let crew = store.create_crew("Tide Turners", "East Coast Park").unwrap();
        store.create_crew("Shell Seekers", "Changi Beach").unwrap();
        let event = store
            .create_event("Sunset Cleanup", "2024-06-01", &crew.id.to_string())
            .unwrap();
        store.join_event_as(event.id, "Kai").unwrap();

        let crews = store.list_crews().to_vec();
        let events = store.list_events().to_vec();

        let mut reopened = CommunityStore::new(store.into_persistence(), ME);
        reopened.load_all().unwrap();

        assert_eq!(reopened.list_crews(), crews.as_slice());
        assert_eq!(reopened.list_events(), events.as_slice());

        let next = reopened.create_crew("Late", "Sentosa").unwrap();
        assert!(next.id.0 > event.id.0);
    }

    #[test]
    fn load_from_empty_storage_yields_empty_lists() {
        let mut store = CommunityStore::new(Persistence::new(MemoryStorage::new()), ME);
        store.load_all().unwrap();
        assert!(store.list_crews().is_empty());
        assert!(store.list_events().is_empty());
    }

    #[test]
    fn malformed_record_is_surfaced() {
        let mut persistence = Persistence::in_memory();
        persistence.save_raw(CREWS_KEY, "{not json").unwrap();

        let mut store = CommunityStore::new(persistence, ME);
        let err = store.load_all().unwrap_err();

        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == CREWS_KEY));
        assert!(store.list_crews().is_empty());
        assert!(store.list_events().is_empty());

        // The next mutation overwrites the bad record.
        store.create_crew("Fresh Start", "Pasir Ris").unwrap();
        let mut reopened = CommunityStore::new(store.into_persistence(), ME);
        reopened.load_all().unwrap();
        assert_eq!(reopened.list_crews().len(), 1);
    }

    #[test]
    fn corrupt_crews_do_not_cost_stored_events() {
        let mut seed = store();
        let crew = seed.create_crew("Tide Turners", "East Coast Park").unwrap();
        let id = crew.id.to_string();
        seed.create_event("Sunrise Sweep", "2024-06-01", &id).unwrap();
        seed.create_event("Sunset Cleanup", "2024-06-02", &id).unwrap();

        let mut persistence = seed.into_persistence();
        persistence.save_raw(CREWS_KEY, "{not json").unwrap();

        let mut store = CommunityStore::new(persistence, ME);
        let err = store.load_all().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == CREWS_KEY));
        assert!(store.list_crews().is_empty());
        assert_eq!(store.list_events().len(), 2);

        let fresh = store.create_crew("Shell Seekers", "Changi Beach").unwrap();
        store
            .create_event("Night Patrol", "2024-06-03", &fresh.id.to_string())
            .unwrap();

        let mut reopened = CommunityStore::new(store.into_persistence(), ME);
        reopened.load_all().unwrap();
        let titles: Vec<_> = reopened.list_events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Sunrise Sweep", "Sunset Cleanup", "Night Patrol"]);
        assert_eq!(reopened.list_crews().len(), 1);
    }

    #[test]
    fn corrupt_events_keep_crews_loaded() {
        let mut seed = store();
        seed.create_crew("Tide Turners", "East Coast Park").unwrap();
        let mut persistence = seed.into_persistence();
        persistence.save_raw(EVENTS_KEY, "[{").unwrap();

        let mut store = CommunityStore::new(persistence, ME);
        let err = store.load_all().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == EVENTS_KEY));
        assert_eq!(store.list_crews().len(), 1);
        assert!(store.list_events().is_empty());
    }

    #[test]
    fn maximal_stored_id_is_rejected_on_load() {
        let mut persistence = Persistence::in_memory();
        persistence
            .save_raw(
                CREWS_KEY,
                r#"[{"id":9223372036854775807,"name":"A","location":"B","members":["x"],"memberCount":1,"created":"Jun 1"}]"#,
            )
            .unwrap();

        let mut store = CommunityStore::new(persistence, ME);
        let err = store.load_all().unwrap_err();
        assert!(matches!(
            err,
            StoreError::IdOutOfRange { ref key, id } if key == CREWS_KEY && id == i64::MAX
        ));
        assert!(store.list_crews().is_empty());

        // Creating still works and issues an ordinary id.
        let crew = store.create_crew("N", "L").unwrap();
        assert!(crew.id.0 < i64::MAX);
    }

    #[test]
    fn stored_counts_are_repaired_on_load() {
        let mut persistence = Persistence::in_memory();
        persistence
            .save_raw(
                CREWS_KEY,
                r#"[{"id":5,"name":"A","location":"B","members":["x","y"],"memberCount":7,"created":"Jun 1"}]"#,
            )
            .unwrap();

        let mut store = CommunityStore::new(persistence, ME);
        store.load_all().unwrap();
        assert_eq!(store.list_crews()[0].member_count, 2);
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let mut store = CommunityStore::new(Persistence::new(FullStorage), ME);

        let err = store.create_crew("Tide Turners", "East Coast Park").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.list_crews().is_empty());
    }
}
