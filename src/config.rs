use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_UPLOAD_DIR: &str = "data/uploads";
const DEFAULT_UPLOAD_BASE: &str = "/uploads";
const DEFAULT_FACILITY_PROFILE_ID: &str = "defaultDoc";
const DEFAULT_MAX_BANNER_BYTES: usize = 5 * 1024 * 1024;

/// Development login created at startup from `SEED_INSTITUTE=id:name:password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInstitute {
    pub id: String,
    pub name: String,
    pub password: String,
}

impl SeedInstitute {
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(3, ':');
        let id = parts.next()?.trim();
        let name = parts.next()?.trim();
        let password = parts.next()?;
        if id.is_empty() || name.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        })
    }
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub upload_dir: PathBuf,
    pub public_upload_base: String,
    pub facility_profile_id: String,
    pub max_banner_bytes: usize,
    pub seed_institute: Option<SeedInstitute>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session_key: None,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            public_upload_base: DEFAULT_UPLOAD_BASE.to_string(),
            facility_profile_id: DEFAULT_FACILITY_PROFILE_ID.to_string(),
            max_banner_bytes: DEFAULT_MAX_BANNER_BYTES,
            seed_institute: None,
        }
    }
}

impl AppConfig {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let max_banner_bytes = match get("MAX_BANNER_BYTES") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("MAX_BANNER_BYTES={raw:?} is not a number, using {DEFAULT_MAX_BANNER_BYTES}");
                DEFAULT_MAX_BANNER_BYTES
            }),
            None => defaults.max_banner_bytes,
        };

        let seed_institute = get("SEED_INSTITUTE").and_then(|raw| {
            let parsed = SeedInstitute::parse(&raw);
            if parsed.is_none() {
                log::warn!("SEED_INSTITUTE must look like id:name:password, ignoring");
            }
            parsed
        });

        Self {
            database_url: get("DATABASE_URL"),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            session_key: get("SESSION_KEY"),
            upload_dir: get("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir),
            public_upload_base: get("PUBLIC_UPLOAD_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_upload_base),
            facility_profile_id: get("FACILITY_PROFILE_ID").unwrap_or(defaults.facility_profile_id),
            max_banner_bytes,
            seed_institute,
        }
    }
}
