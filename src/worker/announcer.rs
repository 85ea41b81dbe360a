use chrono::Utc;
use futures_util::future::join_all;
use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

use crate::board::{BoardError, JobBoard};
use crate::config::Config;
use crate::discord::{Delivery, DiscordClient, DiscordError};
use crate::format::build_messages;

#[derive(Debug, thiserror::Error)]
pub enum AnnounceError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Discord(#[from] DiscordError),
}

/// Background worker that announces recent job listings on a fixed schedule
///
/// Each run is fully stateless: the job set is fetched fresh, nothing is
/// remembered between ticks, and a failed run is simply logged and retried
/// at the next tick.
pub struct Announcer {
    board: JobBoard,
    discord: DiscordClient,
    config: Config,
}

impl Announcer {
    pub fn new(board: JobBoard, discord: DiscordClient, config: Config) -> Self {
        Self {
            board,
            discord,
            config,
        }
    }

    /// Timer loop: one announcement run per tick, until shutdown is signaled
    ///
    /// The first tick fires immediately on startup, then every configured
    /// interval.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "Announcer started: every {}s, window {}h",
            self.config.announce_interval_secs, self.config.recency_window_hours
        );

        let mut ticker = interval(Duration::from_secs(self.config.announce_interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        error!("Announcement run failed: {}", e);
                    }
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Announcer received shutdown signal, stopping");
                        break;
                    }
                }
            }
        }
    }

    /// One announcement run
    ///
    /// Fetches the job set, keeps listings created within the recency
    /// window, formats them into location-grouped messages, dispatches the
    /// messages concurrently, and posts a one-line summary to the log
    /// channel. An empty window means no dispatches at all, summary
    /// included.
    pub async fn run_once(&self) -> Result<(), AnnounceError> {
        let jobs = self.board.fetch_jobs().await?;

        let after = Utc::now() - chrono::Duration::hours(self.config.recency_window_hours);
        let latest: Vec<_> = jobs
            .into_iter()
            .filter(|job| job.created_time > after)
            .collect();

        info!("Collected {} recent jobs from the job board", latest.len());
        if latest.is_empty() {
            return Ok(());
        }

        let announced = latest.len();
        let messages = build_messages(&self.config.public_base_url, latest);

        // Dispatches run concurrently; arrival order at the channel is not
        // guaranteed when more than one message goes out.
        let deliveries: Result<Vec<Delivery>, DiscordError> = join_all(
            messages
                .iter()
                .map(|content| self.discord.post_message(&self.config.discord_channel, content)),
        )
        .await
        .into_iter()
        .collect();
        let deliveries = deliveries?;

        let all_delivered = deliveries.iter().all(Delivery::is_success);
        for delivery in deliveries.iter().filter(|d| !d.is_success()) {
            error!(
                "Discord rejected a message: status={} body={}",
                delivery.status, delivery.body
            );
        }

        let summary = if all_delivered {
            format!(
                "[job-announcer] Sent {} jobs to <#{}>",
                announced, self.config.discord_channel
            )
        } else {
            "[job-announcer] Failed to send jobs to Discord".to_string()
        };

        match &self.config.discord_log_channel {
            Some(log_channel) => {
                self.discord.post_message(log_channel, &summary).await?;
            }
            None => info!("{}", summary),
        }

        Ok(())
    }
}
