use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::{Reading, round1};
use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    name: String,
    weather: Vec<ConditionEntry>,
    main: MainReadings,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
}

pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
    region: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String, region: String) -> Self {
        Self {
            http_client: HttpClient::default(),
            base_url,
            api_key,
            region,
        }
    }

    #[instrument(skip(self), fields(city = %city))]
    pub async fn current_weather(&self, city: &str) -> Result<Reading, AppError> {
        info!(city = %city, "Fetching current weather");

        let url = format!(
            "{}?q={},{}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(city),
            self.region,
            self.api_key
        );

        let response: OpenWeatherResponse = self.http_client.get_json(&url).await?;

        Ok(to_reading(response))
    }
}

fn to_reading(response: OpenWeatherResponse) -> Reading {
    let condition = response
        .weather
        .first()
        .map(|w| w.main.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    Reading {
        city: response.name,
        condition,
        temperature: round1(response.main.temp),
        feels_like: round1(response.main.feels_like),
        timestamp: response.dt,
    }
}
