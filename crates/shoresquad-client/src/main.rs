//! # shoresquad
//!
//! Terminal host for the ShoreSquad app. Reads one command per line from
//! stdin, runs it against the app, and prints every frontend event the
//! command produced.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use shoresquad_client_lib::chrome::ModalPurpose;
use shoresquad_client_lib::commands::{crews, location, map, scheduling, ui, weather};
use shoresquad_client_lib::config::ClientConfig;
use shoresquad_client_lib::error::CommandError;
use shoresquad_client_lib::events::{
    Frontend, FrontendError, EVENT_REGION_UPDATED, EVENT_TOAST_FADING, EVENT_TOAST_REMOVED,
    EVENT_TOAST_SHOWN,
};
use shoresquad_client_lib::state::{AppHandle, AppState};
use shoresquad_client_lib::{init_tracing, open_store, services_from_config, startup};

const HELP: &str = "\
commands:
  crew <name> | <location>           create a crew
  event <title> | <YYYY-MM-DD> | <crew id>
                                     schedule an event
  join <event id>                    join an event
  modal crew|event                   open a form
  field <id> <value>                 fill a form field
  submit                             submit the open form
  esc | backdrop                     close the form
  locate                             ask for the device location
  weather                            fetch the weather
  beaches                            find nearby beaches
  start                              scroll to the map
  nav | link                         toggle the menu, follow a link
  image <id> <src> | seen <id>       lazy image loading
  list                               show crews and events
  help | quit";

/// Prints frontend events as plain lines.
struct TerminalFrontend;

impl Frontend for TerminalFrontend {
    fn emit(&self, event: &str, payload: Value) -> Result<(), FrontendError> {
        match event {
            EVENT_REGION_UPDATED => println!(
                "[#{}] {}",
                payload["element_id"].as_str().unwrap_or_default(),
                payload["html"].as_str().unwrap_or_default()
            ),
            EVENT_TOAST_SHOWN => println!(
                "[{}] {}",
                payload["severity"].as_str().unwrap_or_default(),
                payload["message"].as_str().unwrap_or_default()
            ),
            EVENT_TOAST_FADING | EVENT_TOAST_REMOVED => {
                debug!(event, id = %payload["id"], "toast lifecycle")
            }
            _ => println!("({event}) {payload}"),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting ShoreSquad v{}", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    info!(
        user = %config.user_name,
        in_memory = config.in_memory,
        located = config.location.is_some(),
        live_weather = config.weather_api_key.is_some(),
        "Loaded configuration"
    );

    let store = open_store(&config)?;
    let services = services_from_config(&config);
    let app = AppHandle::new(AppState::new(store), Arc::new(TerminalFrontend), services);

    let locating = startup(&app)?;
    if let Err(e) = locating.await? {
        debug!(error = %e, "no location this session");
    }

    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(e) = dispatch(&app, line).await {
            // The user already saw a toast for this.
            debug!(command = line, error = %e, "command failed");
        }
    }

    info!("ShoreSquad stopped");
    Ok(())
}

async fn dispatch(app: &AppHandle, line: &str) -> Result<(), CommandError> {
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd {
        "crew" => {
            let parts = split_fields(rest);
            let field = |i: usize| parts.get(i).copied().unwrap_or_default();
            crews::create_crew(app, field(0), field(1))?;
        }
        "event" => {
            let parts = split_fields(rest);
            let field = |i: usize| parts.get(i).copied().unwrap_or_default();
            scheduling::create_event(app, field(0), field(1), field(2))?;
        }
        "join" => {
            scheduling::join_event_by_value(app, rest)?;
        }
        "modal" => match rest {
            "crew" => ui::open_modal(app, ModalPurpose::CreateCrew)?,
            "event" => ui::open_modal(app, ModalPurpose::ScheduleEvent)?,
            _ => println!("usage: modal crew|event"),
        },
        "field" => {
            let (id, value) = rest.split_once(' ').unwrap_or((rest, ""));
            if !ui::set_modal_field(app, id, value)? {
                println!("no field {id:?} in the open form");
            }
        }
        "submit" => {
            ui::submit_modal(app)?;
        }
        "esc" => ui::handle_key(app, ui::KEY_ESCAPE)?,
        "backdrop" => ui::click_modal(app, true)?,
        "locate" => {
            location::request_location(app).await?;
        }
        "weather" => {
            weather::fetch_weather(app).await?;
        }
        "beaches" => {
            map::find_nearby_beaches(app).await?;
        }
        "start" => ui::start(app),
        "nav" => {
            ui::toggle_nav(app)?;
        }
        "link" => ui::select_nav_link(app)?,
        "image" => {
            let (id, src) = rest.split_once(' ').unwrap_or((rest, ""));
            ui::observe_image(app, id, src.trim())?;
        }
        "seen" => {
            ui::image_visible(app, rest)?;
        }
        "list" => print_lists(app)?,
        "help" => println!("{HELP}"),
        other => println!("unknown command {other:?}, try help"),
    }
    Ok(())
}

fn split_fields(rest: &str) -> Vec<&str> {
    rest.split('|').map(str::trim).collect()
}

fn print_lists(app: &AppHandle) -> Result<(), CommandError> {
    let guard = app.state()?;
    for crew in guard.store.list_crews() {
        println!(
            "crew {} {} @ {} ({} members)",
            crew.id, crew.name, crew.location, crew.member_count
        );
    }
    for event in guard.store.list_events() {
        println!(
            "event {} {} on {} with {} ({} participants)",
            event.id, event.title, event.date, event.crew, event.participant_count
        );
    }
    Ok(())
}
