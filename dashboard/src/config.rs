use common::errors::AppError;
use std::env;
use std::path::PathBuf;

const DEFAULT_CITIES: &str = "Chennai,Bangalore,Kolkata,Mumbai,Delhi,Hyderabad";

pub struct Config {
    pub api_key: String,
    pub openweather_url: String,
    pub cities: Vec<String>,
    pub region: String,
    pub poll_interval_seconds: u64,
    pub history_dir: PathBuf,
    pub max_concurrent_requests: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("OPENWEATHER_API_KEY")
            .map_err(|_| AppError::config("OPENWEATHER_API_KEY must be set"))?;

        let cities = env::var("WEATHER_CITIES")
            .unwrap_or_else(|_| DEFAULT_CITIES.to_string())
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>();

        if cities.is_empty() {
            return Err(AppError::config("WEATHER_CITIES must name at least one city"));
        }

        Ok(Self {
            api_key,
            openweather_url: env::var("OPENWEATHER_URL").unwrap_or_else(|_| {
                "https://api.openweathermap.org/data/2.5/weather".to_string()
            }),
            cities,
            region: env::var("WEATHER_REGION").unwrap_or_else(|_| "IN".to_string()),
            poll_interval_seconds: env::var("POLL_INTERVAL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300), // 5 minutes default
            history_dir: env::var("HISTORY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            max_concurrent_requests: env::var("MAX_CONCURRENT_REQUESTS")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(10),
        })
    }
}
