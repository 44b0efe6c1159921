use chrono::{DateTime, Utc};

use super::SqliteStore;
use crate::error::KbError;
use crate::types::Settings;

type SettingsRow = (String, String, String, String, String, DateTime<Utc>);

impl SqliteStore {
    /// The single settings record, or the built-in defaults when none has
    /// been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_settings(&self) -> Result<Settings, KbError> {
        let row: Option<SettingsRow> = sqlx::query_as(
            "SELECT app_name, welcome_message, map_link, contact_email, icon_url, updated_at \
             FROM settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map_or_else(Settings::default, |r| Settings {
            app_name: r.0,
            welcome_message: r.1,
            map_link: r.2,
            contact_email: r.3,
            icon_url: r.4,
            updated_at: r.5,
        }))
    }

    /// Upsert the single settings record. Admin surface only; the
    /// answering path reads through [`crate::store::SettingsStore`].
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub async fn save_settings(&self, settings: &Settings) -> Result<(), KbError> {
        sqlx::query(
            "INSERT INTO settings \
             (id, app_name, welcome_message, map_link, contact_email, icon_url, updated_at) \
             VALUES (1, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
             app_name = excluded.app_name, \
             welcome_message = excluded.welcome_message, \
             map_link = excluded.map_link, \
             contact_email = excluded.contact_email, \
             icon_url = excluded.icon_url, \
             updated_at = excluded.updated_at",
        )
        .bind(&settings.app_name)
        .bind(&settings.welcome_message)
        .bind(&settings.map_link)
        .bind(&settings.contact_email)
        .bind(&settings.icon_url)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_CONTACT_EMAIL;

    #[tokio::test]
    async fn defaults_when_table_is_empty() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        let settings = store.fetch_settings().await.unwrap();
        assert_eq!(settings.app_name, "Docent Reunion Assistant");
        assert_eq!(settings.contact_email, DEFAULT_CONTACT_EMAIL);
        assert!(settings.map_link.is_empty());
    }

    #[tokio::test]
    async fn save_and_fetch_roundtrip() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        let settings = Settings {
            app_name: "Class of '81 Assistant".to_owned(),
            welcome_message: "Ask away!".to_owned(),
            map_link: "https://maps.example.com/campus".to_owned(),
            contact_email: "organizers@example.com".to_owned(),
            icon_url: String::new(),
            updated_at: Utc::now(),
        };
        store.save_settings(&settings).await.unwrap();

        let fetched = store.fetch_settings().await.unwrap();
        assert_eq!(fetched.app_name, "Class of '81 Assistant");
        assert_eq!(fetched.map_link, "https://maps.example.com/campus");
    }

    #[tokio::test]
    async fn second_save_overwrites() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        let mut settings = Settings {
            updated_at: Utc::now(),
            ..Settings::default()
        };
        store.save_settings(&settings).await.unwrap();

        settings.contact_email = "new@example.com".to_owned();
        store.save_settings(&settings).await.unwrap();

        let fetched = store.fetch_settings().await.unwrap();
        assert_eq!(fetched.contact_email, "new@example.com");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
