//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// Offset from UTC (in minutes) used to decide what "today" is for scans.
    pub timezone_offset_minutes: i32,
    pub default_admin_password: String,
    pub default_student_password: String,
    /// Attendance percentage at or above which a student is eligible.
    pub eligibility_threshold_percent: f64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every field has a development default so the service and its tests can
    /// start without a `.env` file. `JWT_SECRET` must be overridden in production.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "qr-attendance"),
            log_level: var_or("LOG_LEVEL", "api=info,services=info,db=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/attendance.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 5000),
            jwt_secret: var_or("JWT_SECRET", "super_secret_key_change_me"),
            jwt_duration_minutes: parsed_or("JWT_DURATION_MINUTES", 480),
            timezone_offset_minutes: parsed_or("TIMEZONE_OFFSET_MINUTES", 60),
            default_admin_password: var_or("DEFAULT_ADMIN_PASSWORD", "admin123"),
            default_student_password: var_or("DEFAULT_STUDENT_PASSWORD", "student123"),
            eligibility_threshold_percent: parsed_or("ELIGIBILITY_THRESHOLD_PERCENT", 70.0),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// Do not hold the guard across an `.await`; prefer the free accessors below.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        // A poisoned lock still holds a fully written config.
        lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_timezone_offset_minutes(value: i32) {
        AppConfig::set_field(|cfg| cfg.timezone_offset_minutes = value);
    }

    pub fn set_eligibility_threshold_percent(value: f64) {
        AppConfig::set_field(|cfg| cfg.eligibility_threshold_percent = value);
    }
}

// --- Free accessors (clone out of the lock) ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn timezone_offset_minutes() -> i32 {
    AppConfig::global().timezone_offset_minutes
}

pub fn default_admin_password() -> String {
    AppConfig::global().default_admin_password.clone()
}

pub fn default_student_password() -> String {
    AppConfig::global().default_student_password.clone()
}

pub fn eligibility_threshold_percent() -> f64 {
    AppConfig::global().eligibility_threshold_percent
}
