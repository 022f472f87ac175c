//! # Store Profile Repository
//!
//! The store profile is a singleton: one row, id pinned to 1 by a
//! CHECK constraint. "Create" and "update" are therefore the same
//! operation, an upsert of that row.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use nota_core::{StoreProfile, STORE_PROFILE_ID};

/// Repository for the singleton store profile.
#[derive(Debug, Clone)]
pub struct StoreProfileRepository {
    pool: SqlitePool,
}

impl StoreProfileRepository {
    /// Creates a new StoreProfileRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreProfileRepository { pool }
    }

    /// Gets the store profile.
    ///
    /// ## Returns
    /// * `Ok(Some(StoreProfile))` - profile has been saved
    /// * `Ok(None)` - profile never saved
    pub async fn get(&self) -> DbResult<Option<StoreProfile>> {
        let profile = sqlx::query_as::<_, StoreProfile>(
            r#"
            SELECT id, store_name, address, city, phone, email, npwp,
                   owner_name, updated_at
            FROM store_profile
            WHERE id = ?1
            "#,
        )
        .bind(STORE_PROFILE_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Saves the store profile (insert or update, silently).
    pub async fn upsert(&self, profile: &StoreProfile) -> DbResult<StoreProfile> {
        debug!(store_name = %profile.store_name, "Saving store profile");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO store_profile (
                id, store_name, address, city, phone, email, npwp,
                owner_name, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (id) DO UPDATE SET
                store_name = excluded.store_name,
                address = excluded.address,
                city = excluded.city,
                phone = excluded.phone,
                email = excluded.email,
                npwp = excluded.npwp,
                owner_name = excluded.owner_name,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(STORE_PROFILE_ID)
        .bind(&profile.store_name)
        .bind(&profile.address)
        .bind(&profile.city)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.npwp)
        .bind(&profile.owner_name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let mut saved = profile.clone();
        saved.id = STORE_PROFILE_ID;
        saved.updated_at = now;

        Ok(saved)
    }
}
