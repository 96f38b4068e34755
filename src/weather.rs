//! Open-Meteo weather + geocoding, Nominatim reverse geocoding.
//!
//! No API keys involved. Callers treat any failure as "weather unavailable";
//! nothing here is load-bearing for the rest of the app.

use anyhow::{Result, anyhow};
use serde::Deserialize;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

const USER_AGENT: &str = "moodrs/1.0";

const MAX_SEARCH_RESULTS: usize = 15;

/// London, the fallback when no location has been picked.
pub const DEFAULT_LATITUDE: f64 = 51.5074;
pub const DEFAULT_LONGITUDE: f64 = -0.1278;

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCurrent {
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherDaily {
    pub time: Vec<String>,
    pub weather_code: Vec<i32>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct WeatherForecast {
    pub current: WeatherCurrent,
    pub daily: WeatherDaily,
    pub timezone: String,
}

/// Human label for a WMO weather code.
pub fn weather_code_label(code: i32) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 | 53 | 55 => "Drizzle",
        61 | 63 | 65 => "Rain",
        71 | 73 | 75 | 77 => "Snow",
        80 | 81 | 82 => "Showers",
        85 | 86 => "Snow showers",
        95 | 96 | 99 => "Thunderstorm",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    /// e.g. "Cape Town, South Africa" for list display.
    pub display_label: String,
}

// The geocoding API sometimes returns only a country_code; this covers the
// common ones so the picker still shows a readable country.
fn country_name(code: &str) -> Option<&'static str> {
    Some(match code {
        "ZA" => "South Africa",
        "GB" => "United Kingdom",
        "US" => "United States",
        "AU" => "Australia",
        "CA" => "Canada",
        "DE" => "Germany",
        "FR" => "France",
        "IN" => "India",
        "KE" => "Kenya",
        "NG" => "Nigeria",
        "EG" => "Egypt",
        "MA" => "Morocco",
        _ => return None,
    })
}

fn country_display(code: Option<&str>, full: Option<&str>) -> Option<String> {
    if let Some(full) = full
        && !full.trim().is_empty()
    {
        return Some(full.to_string());
    }
    let code = code.filter(|c| !c.is_empty())?;
    Some(country_name(code).unwrap_or(code).to_string())
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: WeatherCurrent,
    daily: WeatherDaily,
    #[serde(default = "default_timezone")]
    timezone: String,
}

fn default_timezone() -> String {
    "auto".to_string()
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawPlace>,
}

#[derive(Deserialize)]
struct RawPlace {
    name: Option<String>,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    country_code: Option<String>,
}

#[derive(Deserialize)]
struct ReverseResponse {
    address: Option<ReverseAddress>,
    display_name: Option<String>,
}

#[derive(Deserialize, Default)]
struct ReverseAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

pub struct WeatherClient {
    client: reqwest::Client,
    forecast_url: String,
    geocoding_url: String,
    reverse_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_endpoints(FORECAST_URL, GEOCODING_URL, NOMINATIM_URL)
    }

    pub fn with_endpoints(forecast_url: &str, geocoding_url: &str, reverse_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_default();
        Self {
            client,
            forecast_url: forecast_url.to_string(),
            geocoding_url: geocoding_url.to_string(),
            reverse_url: reverse_url.to_string(),
        }
    }

    /// Current conditions plus the daily min/max series for one location.
    pub async fn forecast(&self, latitude: f64, longitude: f64) -> Result<WeatherForecast> {
        let resp = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("weather request failed (status={})", resp.status()));
        }
        let data: ForecastResponse = resp.json().await?;
        Ok(WeatherForecast {
            current: data.current,
            daily: data.daily,
            timezone: data.timezone,
        })
    }

    /// Name search for the location picker. Queries under two characters
    /// return empty without touching the network; `count` is capped at 15.
    pub async fn search(&self, query: &str, count: usize) -> Result<Vec<GeocodingResult>> {
        let trimmed = query.trim();
        if trimmed.chars().count() < 2 {
            return Ok(Vec::new());
        }
        let resp = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("name", trimmed.to_string()),
                ("count", count.min(MAX_SEARCH_RESULTS).to_string()),
                ("language", "en".to_string()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("geocoding request failed (status={})", resp.status()));
        }
        let data: SearchResponse = resp.json().await?;
        Ok(data
            .results
            .into_iter()
            .map(|place| {
                let name = place
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| trimmed.to_string());
                let country =
                    country_display(place.country_code.as_deref(), place.country.as_deref());
                let display_label = match &country {
                    Some(country) => format!("{name}, {country}"),
                    None => name.clone(),
                };
                GeocodingResult {
                    name,
                    latitude: place.latitude,
                    longitude: place.longitude,
                    country,
                    display_label,
                }
            })
            .collect())
    }

    /// First search hit for a name, if any.
    pub async fn geocode(&self, name: &str) -> Result<Option<GeocodingResult>> {
        Ok(self.search(name, 1).await?.into_iter().next())
    }

    /// Coordinates to a readable place label, best effort.
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<GeocodingResult>> {
        let resp = self
            .client
            .get(&self.reverse_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!(
                "reverse geocoding request failed (status={})",
                resp.status()
            ));
        }
        let data: ReverseResponse = resp.json().await?;
        let Some(addr) = data.address else {
            return Ok(None);
        };
        let city = addr
            .city
            .or(addr.town)
            .or(addr.village)
            .or(addr.state)
            .unwrap_or_default();
        let country = addr.country.unwrap_or_default();
        let display_label = if !city.is_empty() && !country.is_empty() {
            format!("{city}, {country}")
        } else {
            data.display_name
                .unwrap_or_else(|| "Current location".to_string())
        };
        Ok(Some(GeocodingResult {
            name: if city.is_empty() {
                "Current location".to_string()
            } else {
                city
            },
            latitude,
            longitude,
            country: (!country.is_empty()).then_some(country),
            display_label,
        }))
    }
}
