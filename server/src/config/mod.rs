use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::{Local, NaiveDate};

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub production: bool,
    pub allowed_origins: Vec<String>,
    /// Pins "today" so the 2024 fixtures stay upcoming in demos.
    pub today_override: Option<NaiveDate>,
    pub seed_fixtures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            production: false,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
            today_override: None,
            seed_fixtures: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: parse_var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            production: env::var("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or(defaults.allowed_origins),
            today_override: parse_var("CAMPUS_EVENTS_TODAY"),
            seed_fixtures: parse_var("SEED_FIXTURES").unwrap_or(defaults.seed_fixtures),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

fn parse_var<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Config: ignoring invalid {}='{}': {}", key, raw, e);
            None
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
