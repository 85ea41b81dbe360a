use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Airtable API token used as a Bearer credential
    pub airtable_api_token: String,

    /// Airtable REST base URL, including the base id
    /// Format: https://api.airtable.com/v0/BASE_ID
    pub airtable_base_url: String,

    /// Airtable table holding the job listings
    pub airtable_table: String,

    /// Discord bot token
    pub discord_api_token: String,

    /// Discord REST base URL
    pub discord_api_base_url: String,

    /// Channel id that receives the job announcements
    pub discord_channel: String,

    /// Optional channel id for run status summaries; when unset the
    /// summary is only written to the local log
    pub discord_log_channel: Option<String>,

    /// Externally reachable base URL used to build /jobs/{id} redirect links
    pub public_base_url: String,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// How far back a job's creation time may lie for it to be announced
    pub recency_window_hours: i64,

    /// Seconds between announcement runs
    pub announce_interval_secs: u64,

    /// Directory for rotating log files
    pub log_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required environment variables:
    /// - AIRTABLE_API_TOKEN: Airtable personal access token
    /// - DISCORD_API_TOKEN: Discord bot token
    /// - DISCORD_CHANNEL: announcement channel id
    /// - PUBLIC_BASE_URL: base URL for redirect links, no trailing slash
    ///
    /// Optional environment variables:
    /// - AIRTABLE_BASE_URL (default: the production base)
    /// - AIRTABLE_TABLE (default: "Jobs")
    /// - DISCORD_API_BASE_URL (default: "https://discord.com/api/v10")
    /// - DISCORD_LOG_CHANNEL (default: unset, summaries stay local)
    /// - BIND_ADDR (default: "127.0.0.1:8080")
    /// - RECENCY_WINDOW_HOURS (default: 24, must not be negative)
    /// - ANNOUNCE_INTERVAL_SECS (default: 86400, must be greater than zero)
    /// - LOG_DIR (default: "logs")
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let airtable_api_token = env::var("AIRTABLE_API_TOKEN")
            .map_err(|_| "AIRTABLE_API_TOKEN must be set in .env file or environment".to_string())?;

        let discord_api_token = env::var("DISCORD_API_TOKEN")
            .map_err(|_| "DISCORD_API_TOKEN must be set in .env file or environment".to_string())?;

        let discord_channel = env::var("DISCORD_CHANNEL")
            .map_err(|_| "DISCORD_CHANNEL must be set in .env file or environment".to_string())?;

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .map_err(|_| "PUBLIC_BASE_URL must be set in .env file or environment".to_string())?;

        let airtable_base_url = env::var("AIRTABLE_BASE_URL")
            .unwrap_or_else(|_| "https://api.airtable.com/v0/appgLXjsOyliS6ndz".to_string());

        let airtable_table = env::var("AIRTABLE_TABLE").unwrap_or_else(|_| "Jobs".to_string());

        let discord_api_base_url = env::var("DISCORD_API_BASE_URL")
            .unwrap_or_else(|_| "https://discord.com/api/v10".to_string());

        let discord_log_channel = env::var("DISCORD_LOG_CHANNEL")
            .ok()
            .filter(|channel| !channel.is_empty());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let recency_window_hours: i64 = env::var("RECENCY_WINDOW_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);
        if recency_window_hours < 0 {
            return Err("RECENCY_WINDOW_HOURS must not be negative".to_string());
        }

        // A zero period would panic the announcer's interval timer.
        let announce_interval_secs: u64 = env::var("ANNOUNCE_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24 * 60 * 60);
        if announce_interval_secs == 0 {
            return Err("ANNOUNCE_INTERVAL_SECS must be greater than zero".to_string());
        }

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Ok(Config {
            airtable_api_token,
            airtable_base_url,
            airtable_table,
            discord_api_token,
            discord_api_base_url,
            discord_channel,
            discord_log_channel,
            public_base_url,
            bind_addr,
            recency_window_hours,
            announce_interval_secs,
            log_dir,
        })
    }
}
