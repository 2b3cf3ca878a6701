//! Legacy record store: one append-only csv file.
//!
//! The column order is fixed and the file starts with a UTF-8 byte order
//! mark so spreadsheet tools pick up the Arabic text correctly. Reads access
//! columns by position; the layout has no registration-date column.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::{RecordStore, StoreError};
use crate::models::{Gender, PlayerId, PlayerRecord, NO_PHOTO};

const BOM: &[u8] = b"\xEF\xBB\xBF";

const HEADER: [&str; 19] = [
    "Code",
    "Player Name",
    "Player Photo",
    "Player NID",
    "Date of Birth",
    "Age",
    "Gender",
    "Phone Number",
    "Address",
    "Father Name",
    "Father NID",
    "Father's Job",
    "Mother Name",
    "Mother NID",
    "Mother's Job",
    "Sport",
    "Belt Degree",
    "Player Number",
    "Subscription (EGP)",
];

/// Legacy backend over a delimited text file. Inserts append; update and
/// delete rewrite the whole file. There is no registration-date column.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            // Rows without a parseable code or date are skipped rather than
            // failing the whole read.
            if let Some(record) = Self::record_from_row(&row) {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn record_from_row(row: &StringRecord) -> Option<PlayerRecord> {
        let field = |i: usize| row.get(i).unwrap_or("").to_string();
        let optional = |i: usize| {
            let value = field(i);
            if value.trim().is_empty() {
                None
            } else {
                Some(value)
            }
        };
        let id = row.get(0)?.trim().parse::<PlayerId>().ok()?;
        let date_of_birth = NaiveDate::parse_from_str(row.get(4)?.trim(), "%Y-%m-%d").ok()?;
        let photo = field(2);
        Some(PlayerRecord {
            id,
            name: field(1),
            photo: if photo.is_empty() {
                NO_PHOTO.to_string()
            } else {
                photo
            },
            national_id: optional(3),
            date_of_birth,
            age: row.get(5).unwrap_or("").trim().parse().unwrap_or(0),
            gender: Gender::parse(row.get(6).unwrap_or("")),
            phone_number: field(7),
            address: field(8),
            father_name: field(9),
            father_national_id: optional(10),
            father_job: field(11),
            mother_name: field(12),
            mother_national_id: optional(13),
            mother_job: field(14),
            sport: field(15),
            belt_degree: field(16),
            player_number: optional(17),
            subscription_fee: row.get(18).unwrap_or("").trim().parse().unwrap_or(0.0),
            registration_date: None,
        })
    }

    fn row_from_record(record: &PlayerRecord) -> [String; 19] {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();
        [
            record.id.to_string(),
            record.name.clone(),
            record.photo.clone(),
            optional(&record.national_id),
            record.date_of_birth.format("%Y-%m-%d").to_string(),
            record.age.to_string(),
            record.gender.as_str().to_string(),
            record.phone_number.clone(),
            record.address.clone(),
            record.father_name.clone(),
            optional(&record.father_national_id),
            record.father_job.clone(),
            record.mother_name.clone(),
            optional(&record.mother_national_id),
            record.mother_job.clone(),
            record.sport.clone(),
            record.belt_degree.clone(),
            optional(&record.player_number),
            format!("{:.2}", record.subscription_fee),
        ]
    }

    fn append(&self, record: &PlayerRecord) -> Result<(), StoreError> {
        let is_new = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if is_new {
            file.write_all(BOM)?;
        }
        let mut writer = WriterBuilder::new().from_writer(file);
        if is_new {
            writer.write_record(HEADER)?;
        }
        writer.write_record(Self::row_from_record(record))?;
        writer.flush()?;
        Ok(())
    }

    fn rewrite(&self, records: &[PlayerRecord]) -> Result<(), StoreError> {
        let mut file = File::create(&self.path)?;
        file.write_all(BOM)?;
        let mut writer = WriterBuilder::new().from_writer(file);
        writer.write_record(HEADER)?;
        for record in records {
            writer.write_record(Self::row_from_record(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn sorted_newest_first(mut records: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }
}

#[async_trait]
impl RecordStore for CsvStore {
    async fn insert(&self, record: &PlayerRecord) -> Result<(), StoreError> {
        self.append(record)
    }

    async fn update(&self, id: PlayerId, record: &PlayerRecord) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = PlayerRecord {
            id,
            registration_date: slot.registration_date,
            ..record.clone()
        };
        self.rewrite(&records)
    }

    async fn delete(&self, id: PlayerId) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.rewrite(&records)
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<PlayerRecord>, StoreError> {
        Ok(self.read_all()?.into_iter().find(|r| r.id == id))
    }

    async fn search(&self, term: &str) -> Result<Vec<PlayerRecord>, StoreError> {
        let needle = term.trim().to_lowercase();
        let records = self
            .read_all()?
            .into_iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle) || r.id.to_string().contains(&needle)
            })
            .collect();
        Ok(Self::sorted_newest_first(records))
    }

    async fn all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Ok(Self::sorted_newest_first(self.read_all()?))
    }
}
