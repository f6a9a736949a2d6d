use common::errors::AppError;
use common::models::Reading;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, instrument, warn};

use crate::api_client::OpenWeatherClient;

/// Runs one all-or-nothing fetch cycle across the configured cities.
///
/// Every city is requested concurrently and the cycle joins on all of them.
/// Partial completion is not supported: if any single request fails, the
/// whole cycle fails and no readings are produced.
pub struct Fetcher {
    client: Arc<OpenWeatherClient>,
    semaphore: Arc<Semaphore>,
    cancellation_token: CancellationToken,
}

impl Fetcher {
    pub fn new(
        client: Arc<OpenWeatherClient>,
        max_concurrent_requests: usize,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            client,
            semaphore: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
            cancellation_token,
        }
    }

    #[instrument(skip(self, cities), fields(city_count = cities.len()))]
    pub async fn fetch_cycle(&self, cities: &[String]) -> Result<Vec<Reading>, AppError> {
        info!(count = cities.len(), "Starting fetch cycle");

        let mut handles = Vec::with_capacity(cities.len());

        for city in cities {
            let city = city.clone();
            let semaphore = self.semaphore.clone();
            let client = self.client.clone();
            let cancel = self.cancellation_token.clone();

            let handle = tokio::spawn(
                async move {
                    if cancel.is_cancelled() {
                        return (city, Err(AppError::internal("Cycle cancelled")));
                    }

                    let _permit = match semaphore.acquire().await {
                        Ok(p) => p,
                        Err(_) => {
                            return (city, Err(AppError::internal("Semaphore closed")));
                        }
                    };

                    tokio::select! {
                        result = client.current_weather(&city) => (city, result),
                        _ = cancel.cancelled() => {
                            (city, Err(AppError::internal("Cycle cancelled")))
                        }
                    }
                }
                .in_current_span(),
            );

            handles.push(handle);
        }

        // Join everything before deciding the outcome, so a failed cycle does
        // not leave tasks mid-flight holding permits.
        let mut readings = Vec::with_capacity(handles.len());
        let mut first_failure: Option<AppError> = None;

        for handle in handles {
            match handle.await {
                Ok((_, Ok(reading))) => readings.push(reading),
                Ok((city, Err(e))) => {
                    warn!(city = %city, error = %e, "City request failed");
                    first_failure.get_or_insert(e);
                }
                Err(e) => {
                    error!(error = %e, "Task join error");
                    first_failure
                        .get_or_insert_with(|| AppError::internal(format!("Join error: {}", e)));
                }
            }
        }

        match first_failure {
            Some(e) => {
                warn!(error = %e, "Fetch cycle failed, discarding partial results");
                Err(e)
            }
            None => {
                info!(count = readings.len(), "Fetch cycle completed");
                Ok(readings)
            }
        }
    }
}
