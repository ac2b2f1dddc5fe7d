use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_APPOINTMENTS_TABLE: &str = "appointments";

/// Which document store backs the appointment collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Supabase,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(StoreBackend::Supabase),
            "memory" | "in-memory" | "inmemory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Supabase => write!(f, "supabase"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_token: Option<String>,
    pub appointments_table: String,
    pub cors_allowed_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store_backend: StoreBackend::Memory,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_token: None,
            appointments_table: DEFAULT_APPOINTMENTS_TABLE.to_string(),
            cors_allowed_origin: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let supabase_url = env::var("SUPABASE_URL")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_URL not set, using empty value");
                String::new()
            });

        let store_backend = match env::var("APPOINTMENT_STORE") {
            Ok(value) => value.parse::<StoreBackend>().unwrap_or_else(|e: String| {
                warn!("{}, falling back to in-memory store", e);
                StoreBackend::Memory
            }),
            Err(_) if !supabase_url.is_empty() => StoreBackend::Supabase,
            Err(_) => {
                warn!("APPOINTMENT_STORE not set and no Supabase URL, using in-memory store");
                StoreBackend::Memory
            }
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| match p.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("PORT '{}' is not a valid port, using {}", p, DEFAULT_PORT);
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);

        let config = Self {
            port,
            store_backend,
            supabase_url,
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_service_token: env::var("SUPABASE_SERVICE_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            appointments_table: env::var("APPOINTMENTS_TABLE")
                .ok()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_APPOINTMENTS_TABLE.to_string()),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|o| !o.is_empty()),
        };

        if config.store_backend == StoreBackend::Supabase && !config.is_configured() {
            warn!("Supabase store selected but SUPABASE_URL / SUPABASE_ANON_PUBLIC_KEY are missing");
        }

        config
    }

    /// True when the Supabase-backed store has what it needs to connect.
    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }

    /// Bearer token sent to PostgREST. The anon key doubles as the token when
    /// no service token is configured.
    pub fn supabase_bearer_token(&self) -> &str {
        self.supabase_service_token
            .as_deref()
            .unwrap_or(&self.supabase_anon_key)
    }
}
