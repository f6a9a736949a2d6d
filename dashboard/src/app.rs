use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::history;
use crate::render;
use crate::store::HistoryStore;
use chrono::Local;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Drive fetch cycles until the shutdown future resolves.
///
/// The shutdown future races every await point, including an in-flight
/// fetch cycle, so a signal arriving mid-cycle abandons the cycle instead
/// of waiting for it to join.
pub async fn run(
    config: Config,
    fetcher: Fetcher,
    store: HistoryStore,
    shutdown: impl Future<Output = ()>,
) {
    let mut history = store.load();

    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_seconds));
    // Cycles are serialized: a slow cycle delays the next tick instead of
    // overlapping with it, so stale results can never overwrite newer ones.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let outcome = tokio::select! {
                    result = fetcher.fetch_cycle(&config.cities) => result,
                    _ = &mut shutdown => break,
                };

                match outcome {
                    Ok(readings) => {
                        history = history::merge(&history, &readings, Local::now());
                        store.save(&history);
                        println!("{}", render::render_dashboard(&readings, &history));
                    }
                    Err(e) => {
                        error!(error = %e, "Fetch cycle failed, keeping last readings");
                        println!("{}", render::render_error(&e));
                    }
                }
            }
            _ = &mut shutdown => break,
        }
    }

    info!("Poll loop stopped");
}
