use chrono_tz::Tz;
use clap::Parser;
use once_cell::sync::Lazy;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenvy::dotenv().ok();
    Config::parse()
});

#[derive(Debug, Parser)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env)]
    pub database_uri: String,

    #[clap(long, env)]
    pub database_name: String,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env, default_value_t = false)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value_t = 100)]
    pub rate_limit_req_per_sec: u32,

    #[clap(long, env, value_delimiter = ',')]
    pub cors_origin_whitelist: Option<Vec<String>>,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,

    /// Bearer secret expected by the daily cron endpoint. The endpoint
    /// rejects every request when unset.
    #[clap(long, env)]
    pub cron_secret: Option<String>,

    #[clap(long, env)]
    pub openai_api_key: Option<String>,

    #[clap(long, env, default_value = "gpt-3.5-turbo")]
    pub openai_model: String,

    #[clap(long, env, default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    /// IANA timezone used for calendar-day comparisons and the
    /// once-per-day suppression window.
    #[clap(long, env, default_value = "UTC")]
    pub notification_timezone: String,

    #[clap(long, env, default_value_t = 7)]
    pub wellness_reminder_days: i64,

    #[clap(long, env, default_value_t = 14)]
    pub behavior_reminder_days: i64,
}

impl Config {
    pub fn timezone(&self) -> eyre::Result<Tz> {
        self.notification_timezone
            .parse::<Tz>()
            .map_err(|_| eyre::eyre!("invalid timezone: {}", self.notification_timezone))
    }
}
