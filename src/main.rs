use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use skyscout_app::{Session, WeatherState};
use skyscout_core::{Config, Feedback, FeedbackSink, HapticStyle, InteractionKind};
use skyscout_weather::{FixedLocation, WeatherClient};

/// Headless feedback sink: gestures land in the log instead of speakers.
struct LogSink;

impl FeedbackSink for LogSink {
    fn play_click(&self) {
        tracing::debug!("click");
    }

    fn haptic(&self, style: HapticStyle) {
        tracing::debug!(?style, "haptic");
    }
}

fn main() -> Result<()> {
    // Initialize core
    skyscout_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("SkyScout started");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let client = Arc::new(WeatherClient::new(
        &config.api.forecast_url,
        &config.api.geocoding_url,
        Duration::from_secs(config.api.request_timeout_secs),
    )?);

    let feedback = Feedback::new(Arc::new(LogSink), config.ui.sound_enabled);
    let mut session = Session::new(client, runtime.handle().clone());

    // SKYSCOUT_LAT/SKYSCOUT_LON pin the device position for this headless run.
    let home_pinned = match (std::env::var("SKYSCOUT_LAT"), std::env::var("SKYSCOUT_LON")) {
        (Ok(lat), Ok(lon)) => match (lat.parse::<f64>(), lon.parse::<f64>()) {
            (Ok(latitude), Ok(longitude)) => {
                session.start(Arc::new(FixedLocation::new(latitude, longitude)));
                true
            }
            _ => {
                tracing::warn!("Ignoring unparsable SKYSCOUT_LAT/SKYSCOUT_LON");
                false
            }
        },
        _ => false,
    };

    let mut cities: Vec<String> = std::env::args().skip(1).collect();
    if cities.is_empty() {
        cities = config.ui.presets.clone();
    }
    for city in &cities {
        feedback.notify(InteractionKind::Tap);
        session.favourites_mut().add(city);
    }

    // Pump until every card settles or the deadline passes.
    let deadline = Instant::now() + Duration::from_secs(20);
    loop {
        session.pump();

        let favourites_settled = session
            .favourites()
            .entries()
            .iter()
            .all(|f| !f.weather.is_loading());
        let home_settled = !home_pinned || !session.home().weather().is_loading();

        if (favourites_settled && home_settled) || Instant::now() >= deadline {
            break;
        }
        std::thread::sleep(Duration::from_millis(25));
    }

    if home_pinned {
        println!("Current location");
        print_card(session.home().city_label(), session.home().weather());
        if let Some(banner) = session.home().banner() {
            println!("    {}", banner);
        }
        println!();
    }

    println!("Favourites");
    for entry in session.favourites().entries() {
        print_card(&entry.label, &entry.weather);
    }

    Ok(())
}

fn print_card(label: &str, weather: &WeatherState) {
    let mut line = format!("  {}: {} {}", label, weather.temp_text(), weather.summary_text());
    if let Some(glyph) = weather.glyph() {
        line.push(' ');
        line.push_str(glyph);
    }
    if let Some(updated) = weather.updated_text() {
        line.push_str(&format!(" (updated {})", updated));
    }
    println!("{}", line);

    if let Some(error) = weather.error_text() {
        println!("    {}", error);
    }
}
