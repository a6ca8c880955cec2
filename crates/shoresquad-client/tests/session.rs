//! Whole-session flows driven through the public command API.

use std::sync::Arc;

use shoresquad_client_lib::commands::{crews, scheduling, weather};
use shoresquad_client_lib::config::ClientConfig;
use shoresquad_client_lib::error::CommandError;
use shoresquad_client_lib::events::{RecordingFrontend, Region};
use shoresquad_client_lib::location::FixedGeolocator;
use shoresquad_client_lib::render::{EMPTY_CREWS, EMPTY_EVENTS, MAP_PLACEHOLDER};
use shoresquad_client_lib::state::{AppHandle, AppState, Services};
use shoresquad_client_lib::{open_store, startup, MSG_LOAD_FAILED};
use shoresquad_shared::GeoLocation;
use shoresquad_store::{CommunityStore, Database, JoinOutcome, Persistence};

fn app_with(store: CommunityStore, services: Services) -> (Arc<RecordingFrontend>, AppHandle) {
    let frontend = Arc::new(RecordingFrontend::new());
    let app = AppHandle::new(AppState::new(store), frontend.clone(), services);
    (frontend, app)
}

fn in_memory_app(services: Services) -> (Arc<RecordingFrontend>, AppHandle) {
    let store = CommunityStore::new(Persistence::in_memory(), "Beach Warrior");
    app_with(store, services)
}

fn on_disk_config(path: &std::path::Path) -> ClientConfig {
    ClientConfig {
        db_path: Some(path.to_path_buf()),
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn fresh_session_shows_empty_states() {
    let (frontend, app) = in_memory_app(Services::demo());

    startup(&app).unwrap().await.unwrap().unwrap_err();

    assert!(frontend
        .last_region(Region::CrewList)
        .unwrap()
        .contains(EMPTY_CREWS));
    assert!(frontend
        .last_region(Region::EventList)
        .unwrap()
        .contains(EMPTY_EVENTS));
    assert!(frontend
        .last_region(Region::Map)
        .unwrap()
        .contains(MAP_PLACEHOLDER));
    // Demo services have no location support.
    assert_eq!(
        frontend.toasts(),
        vec![(
            "warning".to_string(),
            "Your device does not support location services".to_string()
        )]
    );
}

#[tokio::test]
async fn tide_turners_sunset_cleanup() {
    let (frontend, app) = in_memory_app(Services::demo());

    let crew = crews::create_crew(&app, "Tide Turners", "East Coast Park").unwrap();
    let event =
        scheduling::create_event(&app, "Sunset Cleanup", "2024-06-01", &crew.id.to_string())
            .unwrap();
    assert_eq!(event.participant_count, 1);
    assert_eq!(event.location, "East Coast Park");

    let html = frontend.last_region(Region::EventList).unwrap();
    assert!(html.contains("Jun 1"));
    assert!(html.contains("Sunset Cleanup"));
    assert!(html.contains("Tide Turners"));

    {
        let mut guard = app.state().unwrap();
        let joined = guard.store.join_event_as(event.id, "Shelly").unwrap();
        assert!(matches!(joined, JoinOutcome::Joined(ref e) if e.participant_count == 2));

        let again = guard.store.join_event_as(event.id, "Shelly").unwrap();
        assert_eq!(again, JoinOutcome::AlreadyJoined);
    }

    assert_eq!(
        scheduling::join_event(&app, event.id).unwrap(),
        JoinOutcome::AlreadyJoined
    );

    let guard = app.state().unwrap();
    let stored = guard.store.find_event(event.id).unwrap();
    assert_eq!(stored.participant_count, 2);
    assert_eq!(stored.participants, vec!["Beach Warrior", "Shelly"]);
}

#[tokio::test]
async fn saved_data_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = on_disk_config(&dir.path().join("shoresquad.db"));

    let (crew, event) = {
        let (_frontend, app) = app_with(open_store(&config).unwrap(), Services::demo());
        startup(&app).unwrap().await.unwrap().unwrap_err();
        let crew = crews::create_crew(&app, "Tide Turners", "East Coast Park").unwrap();
        let event =
            scheduling::create_event(&app, "Sunset Cleanup", "2024-06-01", &crew.id.to_string())
                .unwrap();
        (crew, event)
    };

    let (frontend, app) = app_with(open_store(&config).unwrap(), Services::demo());
    startup(&app).unwrap().await.unwrap().unwrap_err();

    {
        let guard = app.state().unwrap();
        assert_eq!(guard.store.list_crews(), &[crew]);
        assert_eq!(guard.store.list_events(), &[event.clone()]);
    }
    assert!(frontend
        .last_region(Region::CrewList)
        .unwrap()
        .contains("Tide Turners"));

    // Ids keep increasing across sessions.
    let later = crews::create_crew(&app, "Shore Keepers", "Changi").unwrap();
    assert!(later.id.0 > event.id.0);
}

#[tokio::test]
async fn unreadable_saved_data_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoresquad.db");
    Database::open_at(&path)
        .unwrap()
        .set_item("shoresquad_crews", "{not json")
        .unwrap();

    let config = on_disk_config(&path);
    let (frontend, app) = app_with(open_store(&config).unwrap(), Services::demo());
    startup(&app).unwrap().await.unwrap().unwrap_err();

    assert!(frontend.toasts().contains(&("error".to_string(), MSG_LOAD_FAILED.to_string())));
    assert!(frontend
        .last_region(Region::CrewList)
        .unwrap()
        .contains(EMPTY_CREWS));

    // The next write replaces the bad record.
    crews::create_crew(&app, "Tide Turners", "East Coast Park").unwrap();
    let raw = Database::open_at(&path)
        .unwrap()
        .get_item("shoresquad_crews")
        .unwrap()
        .unwrap();
    assert!(raw.contains("Tide Turners"));
}

#[tokio::test]
async fn located_session_fetches_weather() {
    let loc = GeoLocation::new(1.3048, 103.9318, 15.0);
    let services = Services::demo().with_geolocator(FixedGeolocator::located(loc));
    let (frontend, app) = in_memory_app(services);

    assert_eq!(startup(&app).unwrap().await.unwrap().unwrap(), loc);
    assert!(frontend
        .last_region(Region::Map)
        .unwrap()
        .contains("Lat: 1.3048° | Lng: 103.9318°"));

    let report = weather::fetch_weather(&app).await.unwrap();
    assert_eq!(report.condition, "Sunny");
    assert!(frontend
        .last_region(Region::WeatherCard)
        .unwrap()
        .contains("Wind Speed"));
}

#[tokio::test]
async fn denied_location_blocks_weather() {
    let services = Services::demo().with_geolocator(FixedGeolocator::denied());
    let (frontend, app) = in_memory_app(services);

    startup(&app).unwrap().await.unwrap().unwrap_err();
    assert!(matches!(
        weather::fetch_weather(&app).await,
        Err(CommandError::NoLocation)
    ));

    let severities: Vec<String> = frontend.toasts().into_iter().map(|(s, _)| s).collect();
    assert_eq!(severities, vec!["info", "warning"]);
    assert_eq!(frontend.last_region(Region::WeatherCard), None);
}
