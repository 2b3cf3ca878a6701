//! PlayerRecord and related vocabulary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sequential player code minted by the id allocator.
pub type PlayerId = u32;

/// Sentinel stored in the photo field when no photo is on file.
pub const NO_PHOTO: &str = "N/A";

/// Sport recorded when the registration form leaves the field empty.
pub const DEFAULT_SPORT: &str = "Karate";

/// Belt/grade progression, in order. Display vocabulary only; not enforced
/// when a record is written.
pub const BELT_DEGREES: [&str; 12] = [
    "أبيض",
    "أصفر 10",
    "أصفر 9",
    "برتقاني 8",
    "برتقاني 7",
    "أخضر 6",
    "أخضر 5",
    "أزرق 4",
    "أزرق 3",
    "بني 2",
    "بني 1",
    "أسود",
];

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Form value "female" selects Female; anything else falls back to Male.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("female") {
            Gender::Female
        } else {
            Gender::Male
        }
    }
}

/// One player's stored profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    /// Relative path to the stored photo, or [`NO_PHOTO`]. Never empty once
    /// the record exists.
    pub photo: String,
    pub national_id: Option<String>,
    pub date_of_birth: NaiveDate,
    pub age: u32,
    pub gender: Gender,
    pub phone_number: String,
    pub address: String,
    pub father_name: String,
    pub father_national_id: Option<String>,
    pub father_job: String,
    pub mother_name: String,
    pub mother_national_id: Option<String>,
    pub mother_job: String,
    pub sport: String,
    pub belt_degree: String,
    pub player_number: Option<String>,
    pub subscription_fee: f64,
    /// Assigned by the relational store at insert. The legacy csv layout has
    /// no column for it, so csv-backed records carry `None`.
    pub registration_date: Option<NaiveDate>,
}

impl PlayerRecord {
    /// Whether the photo field points at a stored file rather than the sentinel.
    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty() && self.photo != NO_PHOTO
    }
}
