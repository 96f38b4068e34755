//! Main-screen state composition.
//!
//! Pulls every dashboard input from its store in one pass. Each input
//! degrades independently: a failed forecast or a stale motivation cache
//! never blocks the rest of the screen.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::events::{self, EventOrNote};
use crate::lifecycle::Stores;
use crate::planner::PlannerItem;
use crate::profile::UserProfile;
use crate::records;
use crate::weather::{self, WeatherClient, WeatherForecast};

pub struct DashboardState {
    pub greeting: String,
    /// Today's date key, `YYYY-MM-DD`.
    pub today: String,
    /// Cached motivation text. `None` when opted out or the cache is stale;
    /// generation is a separate, explicit step.
    pub motivation: Option<String>,
    /// Events for today and tomorrow, today's first.
    pub upcoming_events: Vec<EventOrNote>,
    pub upcoming_summary: Option<String>,
    pub todays_items: Vec<EventOrNote>,
    pub todays_planner: Vec<PlannerItem>,
    /// Date keys that get a calendar dot.
    pub calendar_dots: BTreeSet<String>,
    /// `None` when weather is off or the fetch failed.
    pub forecast: Option<WeatherForecast>,
}

pub async fn gather(
    stores: &Stores,
    weather_client: &WeatherClient,
    profile: &UserProfile,
    motivation_opt_in: bool,
    today: NaiveDate,
) -> DashboardState {
    let today_key = records::date_key(today);

    let motivation = if motivation_opt_in {
        stores.motivation.cached_for(&today_key)
    } else {
        None
    };

    let upcoming_events = stores.events.upcoming(today);
    let upcoming_summary = events::upcoming_summary(&upcoming_events, &today_key);

    let location = stores.weather_location.load();
    let forecast = if location.weather_enabled {
        let (latitude, longitude) = if location.has_coordinates() {
            (location.latitude, location.longitude)
        } else {
            (weather::DEFAULT_LATITUDE, weather::DEFAULT_LONGITUDE)
        };
        match weather_client.forecast(latitude, longitude).await {
            Ok(forecast) => Some(forecast),
            Err(err) => {
                tracing::warn!("dashboard weather unavailable: {err}");
                None
            }
        }
    } else {
        None
    };

    let todays_items = stores.events.for_date(&today_key);
    let todays_planner = stores.planner.for_date(&today_key);
    let calendar_dots = stores.events.dates_with_items();

    DashboardState {
        greeting: format!("Hi, {}", profile.preferred_username),
        today: today_key,
        motivation,
        upcoming_events,
        upcoming_summary,
        todays_items,
        todays_planner,
        calendar_dots,
        forecast,
    }
}
