//! Duplicate screening run before a registration is accepted.

use crate::models::PlayerRecord;

/// Which duplicate rules a candidate tripped. The rules are independent;
/// more than one flag can be set for the same candidate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DuplicateFlags {
    /// Candidate name has 3+ parts and matches an existing name.
    pub name: bool,
    /// Candidate phone matches an existing record with a different father.
    pub phone: bool,
    /// Candidate national id matches an existing one.
    pub national_id: bool,
}

impl DuplicateFlags {
    pub fn any(&self) -> bool {
        self.name || self.phone || self.national_id
    }

    fn all(&self) -> bool {
        self.name && self.phone && self.national_id
    }
}

/// Scan existing records and report every duplicate rule the candidate trips.
///
/// - Name: only names with at least three whitespace-separated parts are
///   screened; comparison is trimmed and ASCII-case-insensitive.
/// - National id: exact match after trimming, skipped when the candidate has
///   no id.
/// - Phone: same trimmed phone but a different father name means a suspected
///   duplicate household entry under another child; identical father names
///   are allowed to share a phone.
///
/// The scan only stops early once every flag is already set, so the result
/// always equals what a full pass over `existing` would produce.
pub fn find_duplicates(candidate: &PlayerRecord, existing: &[PlayerRecord]) -> DuplicateFlags {
    let name = candidate.name.trim();
    let three_part_name = name.split_whitespace().count() >= 3;
    let national_id = candidate
        .national_id
        .as_deref()
        .map(str::trim)
        .unwrap_or("");
    let phone = candidate.phone_number.trim();
    let father = candidate.father_name.trim();

    let mut flags = DuplicateFlags::default();
    for record in existing {
        if three_part_name && name.eq_ignore_ascii_case(record.name.trim()) {
            flags.name = true;
        }
        if !national_id.is_empty() {
            if let Some(existing_id) = record.national_id.as_deref() {
                if national_id == existing_id.trim() {
                    flags.national_id = true;
                }
            }
        }
        if phone == record.phone_number.trim()
            && !father.eq_ignore_ascii_case(record.father_name.trim())
        {
            flags.phone = true;
        }
        if flags.all() {
            break;
        }
    }
    flags
}
