//! moodrs - local-first wellness companion

mod assistant;
mod chat;
mod dashboard;
mod events;
mod lifecycle;
mod logger;
mod motivation;
mod notifications;
mod paths;
mod planner;
mod profile;
mod providers;
mod records;
mod secure;
mod settings;
mod store;
mod theme;
mod weather;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "moodrs")]
#[command(about = "Local-first wellness companion: calendar, planner, weather, and Gaia")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Onboard,
    Dashboard,
    Status,
    Event {
        #[command(subcommand)]
        command: Option<EventCommands>,
    },
    Planner {
        #[command(subcommand)]
        command: Option<PlannerCommands>,
    },
    Chat {
        #[arg(short, long)]
        message: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    Motivation {
        #[arg(long)]
        refresh: bool,
    },
    Weather {
        #[command(subcommand)]
        command: Option<WeatherCommands>,
    },
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    Destroy {
        #[arg(long)]
        yes: bool,
    },
    Version,
}

#[derive(Subcommand, Debug)]
enum EventCommands {
    Add {
        date: String,
        title: String,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        note: bool,
        #[arg(long)]
        content: Option<String>,
    },
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum PlannerCommands {
    Add {
        kind: String,
        date: String,
        content: String,
    },
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum WeatherCommands {
    Show,
    Search {
        query: String,
    },
    SetLocation {
        name: String,
    },
    Locate {
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommands {
    Show,
    Appearance {
        preference: Option<String>,
    },
    AiBuddy {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    Weather {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        precise: Option<bool>,
    },
    DailyMotivation {
        enabled: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    logger::init(log_level)?;

    match cli.command {
        Commands::Onboard => onboard(),
        Commands::Dashboard => dashboard_cmd(),
        Commands::Status => status_cmd(),
        Commands::Event { command } => event_cmd(command),
        Commands::Planner { command } => planner_cmd(command),
        Commands::Chat { message, clear } => chat_cmd(message, clear),
        Commands::Motivation { refresh } => motivation_cmd(refresh),
        Commands::Weather { command } => weather_cmd(command),
        Commands::Settings { command } => settings_cmd(command),
        Commands::Destroy { yes } => destroy_cmd(yes),
        Commands::Version => {
            println!("🌿 moodrs {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn open_stores() -> Result<(std::path::PathBuf, lifecycle::Stores)> {
    let data_dir = paths::ensure_data_dir()?;
    let stores = lifecycle::Stores::open(&data_dir);
    Ok((data_dir, stores))
}

fn prompt(label: &str) -> Result<String> {
    use std::io::{self, Write};

    print!("{label}: ");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        anyhow::bail!("input closed");
    }
    Ok(input.trim().to_string())
}

fn prompt_required(label: &str) -> Result<String> {
    loop {
        let value = prompt(label)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("This field is required.");
    }
}

fn prompt_optional(label: &str) -> Result<Option<String>> {
    let value = prompt(&format!("{label} (optional)"))?;
    Ok((!value.is_empty()).then_some(value))
}

fn confirm(question: &str) -> Result<bool> {
    use std::io::{self, Write};

    print!("{question} (y/n): ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim() == "y")
}

fn onboard() -> Result<()> {
    let (data_dir, stores) = open_stores()?;

    if let Some(existing) = stores.profile.load()
        && !confirm(&format!(
            "A profile for {} already exists. Overwrite?",
            existing.preferred_username
        ))?
    {
        println!("Aborted.");
        return Ok(());
    }

    println!("🌿 Let's set up your profile.\n");
    let name = prompt_required("Name")?;
    let surname = prompt_required("Surname")?;
    let preferred_username = {
        let value = prompt(&format!("Preferred name [{name}]"))?;
        if value.is_empty() { name.clone() } else { value }
    };
    let date_of_birth = prompt_required("Date of birth (YYYY-MM-DD)")?;

    println!("\nLifestyle goals: {}", profile::LIFESTYLE_GOAL_OPTIONS.join(", "));
    let lifestyle_goals: Vec<String> = prompt("Pick any (comma-separated)")?
        .split(',')
        .map(str::trim)
        .filter(|goal| !goal.is_empty())
        .map(str::to_string)
        .collect();

    println!("\nGender options: {}", profile::GENDER_OPTIONS.join(", "));
    let gender = prompt_optional("Gender")?;
    println!("Race options: {}", profile::RACE_OPTIONS.join(", "));
    let race = prompt_optional("Race/ethnicity")?;
    let country = prompt_optional("Country")?;
    println!("Diet options: {}", profile::DIET_OPTIONS.join(", "));
    let diet = prompt_optional("Diet")?;
    let weight = prompt_optional("Weight in kg")?.and_then(|w| w.parse().ok());
    let height = prompt_optional("Height in cm")?.and_then(|h| h.parse().ok());

    let user = profile::UserProfile {
        name,
        surname,
        preferred_username,
        lifestyle_goals,
        date_of_birth,
        gender,
        race,
        country,
        diet,
        weight,
        height,
        completed_at: None,
    }
    .normalized();
    user.validate()?;
    stores.profile.save(&user)?;

    println!("\n🌿 moodrs is ready, {}!", user.preferred_username);
    println!("Data dir: {}", data_dir.display());
    println!("\nNext steps:");
    println!("  1. See your day: moodrs dashboard");
    println!("  2. Talk to Gaia: moodrs chat -m \"Hello!\"");
    println!("  3. Optional AI replies: moodrs settings ai-buddy --enabled true --api-key <key>");
    println!("     Get a key at: https://ollama.com/settings/keys");

    Ok(())
}

fn dashboard_cmd() -> Result<()> {
    let (_data_dir, stores) = open_stores()?;
    let Some(user) = stores.profile.load() else {
        println!("No profile yet. Run 'moodrs onboard' first.");
        return Ok(());
    };

    let opt_in = motivation::opt_in();
    let today = chrono::Local::now().date_naive();
    let client = weather::WeatherClient::new();

    let runtime = tokio::runtime::Runtime::new()?;
    let state = runtime.block_on(dashboard::gather(&stores, &client, &user, opt_in, today));

    println!("🌿 {}  ({})", state.greeting, state.today);

    if let Some(text) = &state.motivation {
        println!("\n\"{text}\"");
    }

    if let Some(forecast) = &state.forecast {
        let location = stores.weather_location.load();
        let place = if location.location_name.is_empty() {
            "London".to_string()
        } else {
            location.location_name
        };
        println!("\nWeather in {place}:");
        print_forecast(forecast);
    }

    if let Some(summary) = &state.upcoming_summary {
        println!("\n{summary}");
        for event in state.upcoming_events.iter().take(3) {
            let when = if event.date == state.today {
                "today"
            } else {
                "tomorrow"
            };
            match &event.time {
                Some(time) => println!("  • {} at {} ({})", event.title, time, when),
                None => println!("  • {} ({})", event.title, when),
            }
        }
    }

    if !state.todays_items.is_empty() {
        println!("\nToday:");
        for item in &state.todays_items {
            print_entry(item);
        }
    }
    if !state.todays_planner.is_empty() {
        println!("\nPlanner:");
        for item in &state.todays_planner {
            println!("  [{}] {}", item.kind.as_str(), item.content);
        }
    }
    if !state.calendar_dots.is_empty() {
        let dots: Vec<&str> = state.calendar_dots.iter().map(String::as_str).collect();
        println!("\nDays with entries: {}", dots.join(", "));
    }

    Ok(())
}

fn print_forecast(forecast: &weather::WeatherForecast) {
    let current = &forecast.current;
    println!(
        "  {}°C {} (humidity {}%, wind {} km/h)",
        current.temperature_2m,
        weather::weather_code_label(current.weather_code),
        current.relative_humidity_2m,
        current.wind_speed_10m
    );
    let daily = &forecast.daily;
    for (i, date) in daily.time.iter().enumerate().take(3) {
        if let (Some(code), Some(max), Some(min)) = (
            daily.weather_code.get(i),
            daily.temperature_2m_max.get(i),
            daily.temperature_2m_min.get(i),
        ) {
            println!(
                "  {date}: {}, {min}°C to {max}°C",
                weather::weather_code_label(*code)
            );
        }
    }
}

fn print_entry(item: &events::EventOrNote) {
    let time = item
        .time
        .as_deref()
        .map(|t| format!(" at {t}"))
        .unwrap_or_default();
    match item.content.as_deref() {
        Some(content) => println!(
            "  [{}] {}{} - {}",
            item.kind.as_str(),
            item.title,
            time,
            content
        ),
        None => println!("  [{}] {}{}", item.kind.as_str(), item.title, time),
    }
}

fn status_cmd() -> Result<()> {
    let data_dir = paths::data_dir()?;

    println!("🌿 moodrs Status");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!(
        "Data dir: {} {}",
        data_dir.display(),
        if data_dir.exists() { "✓" } else { "✗" }
    );

    let stores = lifecycle::Stores::open(&data_dir);
    match stores.profile.load() {
        Some(user) => {
            println!("Profile: {} {} ✓", user.name, user.surname);
            let goals = if user.lifestyle_goals.is_empty() {
                "none".to_string()
            } else {
                user.lifestyle_goals.join(", ")
            };
            println!("Goals: {goals}");
        }
        None => {
            println!("Profile: not set ✗");
            println!("\nRun 'moodrs onboard' to get started.");
            return Ok(());
        }
    }

    println!("Events & notes: {}", stores.events.all().len());
    println!("Planner items: {}", stores.planner.all().len());
    println!("Chat messages: {}", stores.chat.load().len());
    println!("Appearance: {}", stores.appearance.load().as_str());

    let location = stores.weather_location.load();
    if location.weather_enabled {
        let place = if location.location_name.is_empty() {
            "London (default)".to_string()
        } else {
            location.location_name
        };
        println!("Weather: on, {place}");
    } else {
        println!("Weather: off");
    }

    let ai = settings::AiBuddySettings::load();
    let ai_status = if ai.ready() {
        "✓ ready"
    } else if ai.enabled {
        "enabled, no API key"
    } else {
        "off"
    };
    println!("AI buddy: {ai_status}");
    println!(
        "Daily motivation: {}",
        if motivation::opt_in() { "on" } else { "off" }
    );

    let pending = stores.notifications.pending();
    if !pending.is_empty() {
        let due = stores.notifications.due(chrono::Local::now()).len();
        println!("Notifications: {} pending ({} due)", pending.len(), due);
    }

    Ok(())
}

fn event_cmd(command: Option<EventCommands>) -> Result<()> {
    let (_data_dir, stores) = open_stores()?;

    match command {
        Some(EventCommands::Add {
            date,
            title,
            time,
            note,
            content,
        }) => {
            if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
                anyhow::bail!("date must be YYYY-MM-DD");
            }
            let kind = if note {
                events::EntryKind::Note
            } else {
                events::EntryKind::Event
            };
            let entry = stores.events.add(kind, &date, &title, time, content)?;
            println!("Added {}: {} ({})", entry.kind.as_str(), entry.title, entry.id);
        }
        Some(EventCommands::List { date }) => {
            let items = match date {
                Some(date) => stores.events.for_date(&date),
                None => stores.events.all(),
            };
            if items.is_empty() {
                println!("No events or notes.");
                return Ok(());
            }
            for item in items {
                let time = item
                    .time
                    .as_deref()
                    .map(|t| format!(" at {t}"))
                    .unwrap_or_default();
                println!(
                    "  {} [{}] {}{}  id={}",
                    item.date,
                    item.kind.as_str(),
                    item.title,
                    time,
                    item.id
                );
                if let Some(content) = &item.content {
                    println!("    {content}");
                }
            }
        }
        Some(EventCommands::Remove { id }) => {
            let known = stores.events.all().iter().any(|e| e.id == id);
            stores.events.delete(&id)?;
            if known {
                println!("Removed: {id}");
            } else {
                println!("No entry with id: {id}");
            }
        }
        None => {
            println!("Event commands:");
            println!("  moodrs event add <date> <title> [--time <hh:mm>] [--note] [--content <text>]");
            println!("  moodrs event list [--date <YYYY-MM-DD>]");
            println!("  moodrs event remove <id>");
        }
    }

    Ok(())
}

fn planner_cmd(command: Option<PlannerCommands>) -> Result<()> {
    let (_data_dir, stores) = open_stores()?;

    match command {
        Some(PlannerCommands::Add {
            kind,
            date,
            content,
        }) => {
            let kind: planner::PlannerKind = kind.parse()?;
            if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
                anyhow::bail!("date must be YYYY-MM-DD");
            }
            let item = stores.planner.add(kind, &date, &content)?;
            println!("Added {}: {} ({})", item.kind.as_str(), item.content, item.id);
        }
        Some(PlannerCommands::List { date }) => {
            let items = match date {
                Some(date) => stores.planner.for_date(&date),
                None => stores.planner.all(),
            };
            if items.is_empty() {
                println!("No planner items.");
                return Ok(());
            }
            for item in items {
                println!(
                    "  {} [{}] {}  id={}",
                    item.date,
                    item.kind.as_str(),
                    item.content,
                    item.id
                );
            }
        }
        Some(PlannerCommands::Remove { id }) => {
            let known = stores.planner.all().iter().any(|p| p.id == id);
            stores.planner.delete(&id)?;
            if known {
                println!("Removed: {id}");
            } else {
                println!("No planner item with id: {id}");
            }
        }
        None => {
            println!("Planner commands:");
            println!("  moodrs planner add <meal|workout|mindbody> <date> <content>");
            println!("  moodrs planner list [--date <YYYY-MM-DD>]");
            println!("  moodrs planner remove <id>");
        }
    }

    Ok(())
}

fn chat_cmd(message: Option<String>, clear: bool) -> Result<()> {
    use std::io::{self, Write};

    let (_data_dir, stores) = open_stores()?;
    if clear {
        stores.chat.clear()?;
        println!("Chat history cleared.");
        return Ok(());
    }

    let user = stores.profile.load();
    let ai = settings::AiBuddySettings::load();
    let provider = providers::OllamaProvider::new(&ai);

    if stores.chat.load().is_empty() {
        println!("🌿 Gaia: {}\n", assistant::MEDICAL_DISCLAIMER);
    }

    let runtime = tokio::runtime::Runtime::new()?;

    if let Some(message) = message {
        let reply = runtime.block_on(assistant::run_turn(
            &stores.chat,
            user.as_ref(),
            &ai,
            &provider,
            &message,
        ))?;
        println!("🌿 Gaia: {}", reply.content);
        return Ok(());
    }

    println!("🌿 Chat with Gaia (type 'exit' to leave)\n");
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        let response = runtime.block_on(assistant::run_turn(
            &stores.chat,
            user.as_ref(),
            &ai,
            &provider,
            input,
        ));
        match response {
            Ok(reply) => println!("\n🌿 Gaia: {}\n", reply.content),
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}

fn motivation_cmd(refresh: bool) -> Result<()> {
    let (_data_dir, stores) = open_stores()?;
    let Some(user) = stores.profile.load() else {
        println!("No profile yet. Run 'moodrs onboard' first.");
        return Ok(());
    };

    let ai = settings::AiBuddySettings::load();
    let provider = providers::OllamaProvider::new(&ai);
    let opt_in = motivation::opt_in();
    let today = records::today_key();
    let history = stores.chat.load();

    let runtime = tokio::runtime::Runtime::new()?;
    let text = runtime.block_on(async {
        if refresh {
            motivation::generate_for_today(
                &stores.motivation,
                &stores.notifications,
                &user,
                &ai,
                &history,
                &provider,
                &today,
                opt_in,
            )
            .await
        } else {
            motivation::ensure_for_today(
                &stores.motivation,
                &stores.notifications,
                &user,
                &ai,
                &history,
                &provider,
                &today,
                opt_in,
            )
            .await
        }
    })?;

    match text {
        Some(text) => println!("🌿 {text}"),
        None if !ai.ready() => {
            println!("No motivation today: the AI buddy is not set up.");
            println!("Enable it with: moodrs settings ai-buddy --enabled true --api-key <key>");
        }
        None => println!("No motivation available right now; try again later."),
    }

    Ok(())
}

fn weather_cmd(command: Option<WeatherCommands>) -> Result<()> {
    let (_data_dir, stores) = open_stores()?;
    let client = weather::WeatherClient::new();
    let runtime = tokio::runtime::Runtime::new()?;

    match command {
        Some(WeatherCommands::Show) | None => {
            let location = stores.weather_location.load();
            if !location.weather_enabled {
                println!("Weather is off. Enable it with: moodrs settings weather --enabled true");
                return Ok(());
            }
            let (latitude, longitude, place) = if location.has_coordinates() {
                let place = if location.location_name.is_empty() {
                    "your location".to_string()
                } else {
                    location.location_name.clone()
                };
                (location.latitude, location.longitude, place)
            } else {
                (
                    weather::DEFAULT_LATITUDE,
                    weather::DEFAULT_LONGITUDE,
                    "London (default)".to_string(),
                )
            };
            let forecast = runtime.block_on(client.forecast(latitude, longitude))?;
            println!("🌿 Weather in {place}:");
            print_forecast(&forecast);
        }
        Some(WeatherCommands::Search { query }) => {
            let results = runtime.block_on(client.search(&query, 8))?;
            if results.is_empty() {
                println!("No places found for '{query}'.");
                return Ok(());
            }
            for place in results {
                println!(
                    "  {}  ({}, {})",
                    place.display_label, place.latitude, place.longitude
                );
            }
        }
        Some(WeatherCommands::SetLocation { name }) => {
            let Some(place) = runtime.block_on(client.geocode(&name))? else {
                println!("No match for '{name}'.");
                return Ok(());
            };
            stores.weather_location.update(settings::WeatherLocationUpdate {
                location_name: Some(place.name.clone()),
                latitude: Some(place.latitude),
                longitude: Some(place.longitude),
                use_precise_location: Some(false),
                ..Default::default()
            })?;
            println!(
                "Location set to {} ({}, {})",
                place.display_label, place.latitude, place.longitude
            );
        }
        Some(WeatherCommands::Locate {
            latitude,
            longitude,
        }) => {
            let place = runtime.block_on(client.reverse_geocode(latitude, longitude))?;
            let name = place
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Current location".to_string());
            stores.weather_location.update(settings::WeatherLocationUpdate {
                location_name: Some(name),
                latitude: Some(latitude),
                longitude: Some(longitude),
                use_precise_location: Some(true),
                ..Default::default()
            })?;
            match place {
                Some(p) => println!("Location set to {} ({latitude}, {longitude})", p.display_label),
                None => println!("Location set to ({latitude}, {longitude})"),
            }
        }
    }

    Ok(())
}

fn settings_cmd(command: Option<SettingsCommands>) -> Result<()> {
    let (data_dir, stores) = open_stores()?;

    match command {
        Some(SettingsCommands::Show) | None => {
            let theme = theme::ThemeContext::new(
                settings::AppearanceStore::new(&data_dir),
                theme::detect_system_dark(),
            );
            print_appearance(&theme);

            let location = stores.weather_location.load();
            println!(
                "Weather: {}",
                if location.weather_enabled { "on" } else { "off" }
            );
            if !location.location_name.is_empty() {
                println!(
                    "Location: {} ({}, {})",
                    location.location_name, location.latitude, location.longitude
                );
            }
            println!(
                "Precise location: {}",
                if location.use_precise_location { "on" } else { "off" }
            );

            print_ai_buddy(&settings::AiBuddySettings::load());
            println!(
                "Daily motivation: {}",
                if motivation::opt_in() { "on" } else { "off" }
            );
        }
        Some(SettingsCommands::Appearance { preference }) => {
            let mut theme = theme::ThemeContext::new(
                settings::AppearanceStore::new(&data_dir),
                theme::detect_system_dark(),
            );
            if let Some(raw) = preference {
                let preference: settings::AppearancePreference = raw.parse()?;
                theme.set_preference(preference)?;
                print!("Appearance set. ");
            }
            print_appearance(&theme);
        }
        Some(SettingsCommands::AiBuddy {
            enabled,
            api_key,
            base_url,
            model,
            clear,
        }) => {
            if clear {
                settings::AiBuddySettings::clear()?;
                println!("AI buddy settings cleared.");
                return Ok(());
            }
            let mut ai = settings::AiBuddySettings::load();
            if enabled.is_none() && api_key.is_none() && base_url.is_none() && model.is_none() {
                print_ai_buddy(&ai);
                return Ok(());
            }
            if let Some(enabled) = enabled {
                ai.enabled = enabled;
            }
            if let Some(api_key) = api_key {
                ai.api_key = api_key;
            }
            if let Some(base_url) = base_url {
                ai.base_url = base_url;
            }
            if let Some(model) = model {
                ai.model = model;
            }
            ai.save()?;
            if ai.ready() {
                println!("AI buddy is ready.");
            } else if ai.enabled {
                println!("AI buddy enabled, but no API key is set.");
            } else {
                println!("AI buddy is off.");
            }
        }
        Some(SettingsCommands::Weather { enabled, precise }) => {
            if enabled.is_none() && precise.is_none() {
                let location = stores.weather_location.load();
                println!(
                    "Weather: {}; precise location: {}",
                    if location.weather_enabled { "on" } else { "off" },
                    if location.use_precise_location { "on" } else { "off" }
                );
                return Ok(());
            }
            let updated = stores.weather_location.update(settings::WeatherLocationUpdate {
                weather_enabled: enabled,
                use_precise_location: precise,
                ..Default::default()
            })?;
            println!(
                "Weather: {}; precise location: {}",
                if updated.weather_enabled { "on" } else { "off" },
                if updated.use_precise_location { "on" } else { "off" }
            );
        }
        Some(SettingsCommands::DailyMotivation { enabled }) => match enabled {
            None => println!(
                "Daily motivation: {}",
                if motivation::opt_in() { "on" } else { "off" }
            ),
            Some(true) => {
                motivation::set_opt_in(true)?;
                motivation::reschedule_if_enabled(
                    &stores.motivation,
                    &stores.notifications,
                    true,
                    &records::today_key(),
                    chrono::Local::now(),
                )?;
                println!("Daily motivation on.");
            }
            Some(false) => {
                motivation::set_opt_in(false)?;
                stores.notifications.cancel(motivation::NOTIFICATION_ID)?;
                println!("Daily motivation off.");
            }
        },
    }

    Ok(())
}

fn print_appearance(theme: &theme::ThemeContext) {
    println!(
        "Appearance: {} (dark mode: {})",
        theme.preference().as_str(),
        if theme.is_dark() { "on" } else { "off" }
    );
}

fn print_ai_buddy(ai: &settings::AiBuddySettings) {
    println!("AI buddy: {}", if ai.enabled { "enabled" } else { "off" });
    println!(
        "  API key: {}",
        if ai.api_key.trim().is_empty() { "not set" } else { "set" }
    );
    println!("  Base URL: {}", ai.base_url);
    println!("  Model: {}", ai.model);
}

fn destroy_cmd(yes: bool) -> Result<()> {
    let (_data_dir, stores) = open_stores()?;

    if !yes
        && !confirm(
            "Delete your profile and ALL app data (events, notes, planner, chat, settings)? This cannot be undone.",
        )?
    {
        println!("Aborted.");
        return Ok(());
    }

    lifecycle::destroy_all(&stores)?;
    println!("🌿 All data destroyed. Run 'moodrs onboard' to start fresh.");
    Ok(())
}
