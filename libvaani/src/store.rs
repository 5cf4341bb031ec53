//! Durable preference storage
//!
//! A flat key/value table in SQLite holding the handful of settings that
//! survive restarts (`mode`, `language`, `darkMode`). Values are stored
//! JSON-encoded under their literal keys.
//!
//! Persistence is best-effort by contract: reads never fail (a missing row,
//! an unreachable database, or malformed stored JSON all fall back to the
//! supplied default) and writes swallow storage errors after logging them.
//! Settings must never block or break the UI.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{AppLanguage, AppMode, Preferences};

pub const KEY_MODE: &str = "mode";
pub const KEY_LANGUAGE: &str = "language";
pub const KEY_DARK_MODE: &str = "darkMode";

#[derive(Clone)]
pub struct PrefStore {
    pool: SqlitePool,
}

impl PrefStore {
    /// Open (creating if necessary) the preference database at `db_path`.
    pub async fn open(db_path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(crate::error::StoreError::IoError)?;
        }

        // Forward slashes keep the SQLite URL portable; mode=rwc creates
        // the file on first run.
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(crate::error::StoreError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(crate::error::StoreError::MigrationError)?;

        Ok(Self { pool })
    }

    /// Read `key`, falling back to `default` on any failure.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await;

        let raw: String = match row {
            Ok(Some(row)) => row.get("value"),
            Ok(None) => {
                debug!(key, "preference not set, using default");
                return default;
            }
            Err(e) => {
                warn!(key, error = %e, "preference read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored preference is malformed, using default");
                default
            }
        }
    }

    /// Write `key`, logging rather than propagating storage errors.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "failed to encode preference");
                return;
            }
        };

        let result = sqlx::query(
            "INSERT INTO preferences (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            warn!(key, error = %e, "preference write failed");
        }
    }

    /// Delete `key` if present.
    pub async fn remove(&self, key: &str) {
        let result = sqlx::query("DELETE FROM preferences WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await;

        if let Err(e) = result {
            warn!(key, error = %e, "preference delete failed");
        }
    }

    /// Delete every stored preference.
    pub async fn clear(&self) {
        if let Err(e) = sqlx::query("DELETE FROM preferences").execute(&self.pool).await {
            warn!(error = %e, "preference clear failed");
        }
    }

    /// Load the full preference record, applying `defaults` for anything
    /// missing or unreadable.
    pub async fn load_preferences(&self, defaults: Preferences) -> Preferences {
        Preferences {
            mode: self.get::<AppMode>(KEY_MODE, defaults.mode).await,
            language: self
                .get::<AppLanguage>(KEY_LANGUAGE, defaults.language)
                .await,
            dark_mode: self.get::<bool>(KEY_DARK_MODE, defaults.dark_mode).await,
        }
    }

    /// Persist the full preference record (best-effort).
    pub async fn save_preferences(&self, prefs: &Preferences) {
        self.set(KEY_MODE, &prefs.mode).await;
        self.set(KEY_LANGUAGE, &prefs.language).await;
        self.set(KEY_DARK_MODE, &prefs.dark_mode).await;
    }
}
