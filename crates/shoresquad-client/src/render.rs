//! Markup renderers.
//!
//! Every function here is pure: same input, same markup, no side effects.
//! Views are always rendered whole; there is no diffing.

use std::fmt::Write;

use shoresquad_shared::format::short_date;
use shoresquad_shared::{GeoLocation, WeatherReport};
use shoresquad_store::{Crew, Event};

use crate::notify::Toast;

pub const EMPTY_CREWS: &str = "No crews yet. Create one to get started!";
pub const EMPTY_EVENTS: &str = "No events scheduled yet. Create one!";
pub const MAP_PLACEHOLDER: &str = "Map will appear once your location is available";

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn plural(count: usize, word: &str) -> String {
    if count > 1 {
        format!("{count} {word}s")
    } else {
        format!("{count} {word}")
    }
}

fn empty_state(message: &str) -> String {
    format!(r#"<p class="empty-state">{message}</p>"#)
}

pub fn render_crews(crews: &[Crew]) -> String {
    if crews.is_empty() {
        return empty_state(EMPTY_CREWS);
    }

    let mut html = String::new();
    for crew in crews {
        let _ = write!(
            html,
            r#"<div class="crew-item" data-crew-id="{id}"><p class="crew-item-name">👥 {name}</p><p class="crew-item-location">📍 {location}</p><p class="crew-item-members">{members}</p><small class="crew-item-created">Created: {created}</small></div>"#,
            id = crew.id,
            name = escape(&crew.name),
            location = escape(&crew.location),
            members = plural(crew.member_count, "member"),
            created = escape(&crew.created),
        );
    }
    html
}

pub fn render_events(events: &[Event]) -> String {
    if events.is_empty() {
        return empty_state(EMPTY_EVENTS);
    }

    let mut html = String::new();
    for event in events {
        let _ = write!(
            html,
            r#"<div class="event-card" data-event-id="{id}"><span class="event-date">{date}</span><h3 class="event-title">{title}</h3><p class="event-location">📍 {location}</p><p class="event-crew">👥 {crew}</p><p class="event-participants">{participants}</p><button class="btn btn-secondary" data-action="join-event" data-event-id="{id}">Join Event</button></div>"#,
            id = event.id,
            date = short_date(event.date),
            title = escape(&event.title),
            location = escape(&event.location),
            crew = escape(&event.crew),
            participants = plural(event.participant_count, "participant"),
        );
    }
    html
}

pub fn render_map(location: Option<&GeoLocation>) -> String {
    match location {
        None => format!(r#"<p class="map-placeholder">{MAP_PLACEHOLDER}</p>"#),
        Some(loc) => format!(
            r#"<div class="map-location"><p class="map-title">📍 Your Location</p><p class="map-coordinates">{coords}</p><button class="btn btn-secondary" data-action="find-beaches">Find Nearby Beaches</button></div>"#,
            coords = loc.display_coordinates(),
        ),
    }
}

pub fn render_weather(report: &WeatherReport) -> String {
    let items = [
        ("Temperature", format!("{:.0}°C", report.temperature_c.round() + 0.0)),
        ("Condition", escape(&report.condition)),
        ("Humidity", format!("{}%", report.humidity_pct)),
        ("Wind Speed", format!("{:.0} km/h", report.wind_speed_kmh.round() + 0.0)),
    ];

    let mut html = String::from(r#"<div class="weather-content">"#);
    for (label, value) in items {
        let _ = write!(
            html,
            r#"<div class="weather-item"><p class="weather-item-label">{label}</p><p class="weather-item-value">{value}</p></div>"#
        );
    }
    html.push_str("</div>");
    html
}

pub fn render_crew_form() -> String {
    concat!(
        r#"<div class="form-group"><label for="crewName">Crew Name:</label><input type="text" id="crewName" placeholder="e.g., Tide Turners" required></div>"#,
        r#"<div class="form-group"><label for="crewLocation">Location:</label><input type="text" id="crewLocation" placeholder="e.g., East Coast Park" required></div>"#,
        r#"<button type="submit" class="btn btn-primary">Create Crew</button>"#,
    )
    .to_string()
}

/// The scheduling form. Its crew selector lists the given crews in order.
pub fn render_event_form(crews: &[Crew]) -> String {
    let mut options = String::from(r#"<option value="">-- Choose a crew --</option>"#);
    for crew in crews {
        let _ = write!(
            options,
            r#"<option value="{}">{}</option>"#,
            crew.id,
            escape(&crew.name)
        );
    }

    format!(
        concat!(
            r#"<div class="form-group"><label for="eventTitle">Event Title:</label><input type="text" id="eventTitle" placeholder="e.g., Sunset Beach Cleanup" required></div>"#,
            r#"<div class="form-group"><label for="eventDate">Date:</label><input type="date" id="eventDate" required></div>"#,
            r#"<div class="form-group"><label for="eventCrew">Select Crew:</label><select id="eventCrew" required>{options}</select></div>"#,
            r#"<button type="submit" class="btn btn-primary">Schedule Event</button>"#,
        ),
        options = options
    )
}

pub fn render_toast(toast: &Toast) -> String {
    format!(
        r#"<div class="toast toast-{severity}" data-toast-id="{id}" style="background: {color}; color: #fff;">{message}</div>"#,
        severity = toast.severity,
        id = toast.id,
        color = toast.severity.color(),
        message = escape(&toast.message),
    )
}
