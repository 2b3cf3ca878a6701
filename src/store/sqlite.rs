//! Relational record store on sqlite.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use super::{RecordStore, StoreError};
use crate::models::{Gender, PlayerId, PlayerRecord};

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS players (
    id                 INTEGER PRIMARY KEY,
    name               TEXT NOT NULL,
    photo              TEXT NOT NULL,
    national_id        TEXT,
    date_of_birth      TEXT NOT NULL,
    age                INTEGER NOT NULL,
    gender             TEXT NOT NULL,
    phone_number       TEXT NOT NULL,
    address            TEXT NOT NULL,
    father_name        TEXT NOT NULL,
    father_national_id TEXT,
    father_job         TEXT NOT NULL,
    mother_name        TEXT NOT NULL,
    mother_national_id TEXT,
    mother_job         TEXT NOT NULL,
    sport              TEXT NOT NULL,
    belt_degree        TEXT NOT NULL,
    player_number      TEXT,
    subscription_fee   REAL NOT NULL,
    registration_date  TEXT
)";

/// Primary backend. Ids come from the allocator, never from AUTOINCREMENT;
/// the registration date is assigned here at insert.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Connect and make sure the players table exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new().connect(url).await?;
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    fn record_from_row(row: &SqliteRow) -> sqlx::Result<PlayerRecord> {
        Ok(PlayerRecord {
            id: row.try_get::<i64, _>("id")? as PlayerId,
            name: row.try_get("name")?,
            photo: row.try_get("photo")?,
            national_id: row.try_get("national_id")?,
            date_of_birth: row.try_get("date_of_birth")?,
            age: row.try_get::<i64, _>("age")? as u32,
            gender: Gender::parse(row.try_get::<String, _>("gender")?.as_str()),
            phone_number: row.try_get("phone_number")?,
            address: row.try_get("address")?,
            father_name: row.try_get("father_name")?,
            father_national_id: row.try_get("father_national_id")?,
            father_job: row.try_get("father_job")?,
            mother_name: row.try_get("mother_name")?,
            mother_national_id: row.try_get("mother_national_id")?,
            mother_job: row.try_get("mother_job")?,
            sport: row.try_get("sport")?,
            belt_degree: row.try_get("belt_degree")?,
            player_number: row.try_get("player_number")?,
            subscription_fee: row.try_get("subscription_fee")?,
            registration_date: row.try_get("registration_date")?,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn insert(&self, record: &PlayerRecord) -> Result<(), StoreError> {
        let registration_date: NaiveDate = Utc::now().date_naive();
        sqlx::query(
            "INSERT INTO players (
                id, name, photo, national_id, date_of_birth, age, gender,
                phone_number, address, father_name, father_national_id,
                father_job, mother_name, mother_national_id, mother_job,
                sport, belt_degree, player_number, subscription_fee,
                registration_date
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id as i64)
        .bind(&record.name)
        .bind(&record.photo)
        .bind(&record.national_id)
        .bind(record.date_of_birth)
        .bind(record.age as i64)
        .bind(record.gender.as_str())
        .bind(&record.phone_number)
        .bind(&record.address)
        .bind(&record.father_name)
        .bind(&record.father_national_id)
        .bind(&record.father_job)
        .bind(&record.mother_name)
        .bind(&record.mother_national_id)
        .bind(&record.mother_job)
        .bind(&record.sport)
        .bind(&record.belt_degree)
        .bind(&record.player_number)
        .bind(record.subscription_fee)
        .bind(registration_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, id: PlayerId, record: &PlayerRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE players SET
                name = ?, photo = ?, national_id = ?, date_of_birth = ?,
                age = ?, gender = ?, phone_number = ?, address = ?,
                father_name = ?, father_national_id = ?, father_job = ?,
                mother_name = ?, mother_national_id = ?, mother_job = ?,
                sport = ?, belt_degree = ?, player_number = ?,
                subscription_fee = ?
            WHERE id = ?",
        )
        .bind(&record.name)
        .bind(&record.photo)
        .bind(&record.national_id)
        .bind(record.date_of_birth)
        .bind(record.age as i64)
        .bind(record.gender.as_str())
        .bind(&record.phone_number)
        .bind(&record.address)
        .bind(&record.father_name)
        .bind(&record.father_national_id)
        .bind(&record.father_job)
        .bind(&record.mother_name)
        .bind(&record.mother_national_id)
        .bind(&record.mother_job)
        .bind(&record.sport)
        .bind(&record.belt_degree)
        .bind(&record.player_number)
        .bind(record.subscription_fee)
        .bind(id as i64)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: PlayerId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id as i64)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<PlayerRecord>, StoreError> {
        let row = sqlx::query("SELECT * FROM players WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(Self::record_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn search(&self, term: &str) -> Result<Vec<PlayerRecord>, StoreError> {
        let like = format!("%{}%", term.trim());
        let rows = sqlx::query(
            "SELECT * FROM players
             WHERE name LIKE ? OR CAST(id AS TEXT) LIKE ?
             ORDER BY id DESC",
        )
        .bind(&like)
        .bind(&like)
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| Self::record_from_row(row).map_err(StoreError::from))
            .collect()
    }

    async fn all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let rows = sqlx::query("SELECT * FROM players ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| Self::record_from_row(row).map_err(StoreError::from))
            .collect()
    }
}
