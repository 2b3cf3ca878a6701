//! Duplicate screener rules: name, national id, and phone/father checks.

use academy_player_web::{find_duplicates, PlayerRecord, NO_PHOTO};
use chrono::NaiveDate;

fn record(id: u32, name: &str, phone: &str, father: &str) -> PlayerRecord {
    PlayerRecord {
        id,
        name: name.to_string(),
        photo: NO_PHOTO.to_string(),
        national_id: None,
        date_of_birth: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
        age: 10,
        gender: Default::default(),
        phone_number: phone.to_string(),
        address: "Cairo".to_string(),
        father_name: father.to_string(),
        father_national_id: None,
        father_job: "Engineer".to_string(),
        mother_name: "Mona Said".to_string(),
        mother_national_id: None,
        mother_job: "Teacher".to_string(),
        sport: "Karate".to_string(),
        belt_degree: "أبيض".to_string(),
        player_number: None,
        subscription_fee: 300.0,
        registration_date: None,
    }
}

fn with_nid(mut r: PlayerRecord, nid: &str) -> PlayerRecord {
    r.national_id = Some(nid.to_string());
    r
}

#[test]
fn three_part_name_match_is_flagged_case_insensitively() {
    let existing = vec![record(1, "Ahmed Ali Hassan", "0100000000", "Ali Hassan")];
    let candidate = record(0, "  AHMED ali hassan ", "0111111111", "Ali Hassan");
    let flags = find_duplicates(&candidate, &existing);
    assert!(flags.name);
    assert!(!flags.phone);
    assert!(!flags.national_id);
}

#[test]
fn two_part_name_is_never_a_name_duplicate() {
    let existing = vec![record(1, "Ahmed Ali", "0100000000", "Ali Hassan")];
    let candidate = record(0, "Ahmed Ali", "0122222222", "Ali Hassan");
    let flags = find_duplicates(&candidate, &existing);
    assert!(!flags.name);
}

#[test]
fn shared_national_id_is_flagged() {
    let existing = vec![with_nid(
        record(1, "Omar Khaled Samir", "0100000000", "Khaled Samir"),
        "29801011234567",
    )];
    let candidate = with_nid(
        record(0, "Someone Else Entirely", "0155555555", "Other Father"),
        " 29801011234567 ",
    );
    let flags = find_duplicates(&candidate, &existing);
    assert!(flags.national_id);
    assert!(!flags.name);
}

#[test]
fn empty_national_id_never_matches() {
    let existing = vec![record(1, "Omar Khaled Samir", "0100000000", "Khaled Samir")];
    // Both sides have no national id; that must not count as a duplicate.
    let candidate = record(0, "Another Name Here", "0166666666", "Khaled Samir");
    assert!(!find_duplicates(&candidate, &existing).national_id);
}

#[test]
fn same_phone_different_father_is_flagged() {
    let existing = vec![record(1, "Ahmed Ali Hassan", "0100000000", "Mahmoud Ali")];
    let candidate = record(0, "Sara Tarek Fouad", "0100000000", "Different Father");
    let flags = find_duplicates(&candidate, &existing);
    assert!(flags.phone);
    assert!(!flags.name);
}

#[test]
fn same_phone_same_father_is_allowed() {
    let existing = vec![record(1, "Ahmed Ali Hassan", "0100000000", "Mahmoud Ali")];
    // Sibling registered under the same household: same phone, same father.
    let candidate = record(0, "Sara Ali Hassan Junior", "0100000000", "MAHMOUD ali");
    let flags = find_duplicates(&candidate, &existing);
    assert!(!flags.phone);
}

#[test]
fn flags_accumulate_across_different_records() {
    // Name matches record 1, phone matches record 2; a first-hit exit would
    // miss the second flag.
    let existing = vec![
        record(1, "Ahmed Ali Hassan", "0100000000", "Mahmoud Ali"),
        record(2, "Omar Khaled Samir", "0123456789", "Khaled Samir"),
    ];
    let candidate = record(0, "Ahmed Ali Hassan", "0123456789", "Another Father");
    let flags = find_duplicates(&candidate, &existing);
    assert!(flags.name);
    assert!(flags.phone);
    assert!(!flags.national_id);
}

#[test]
fn registration_scenario() {
    // Register "Ahmed Ali Hassan" -> no duplicates against an empty store.
    let first = record(1, "Ahmed Ali Hassan", "0100000000", "Mahmoud Ali");
    assert!(!find_duplicates(&first, &[]).any());

    let existing = vec![first];

    // Same three-part name again with a different phone -> nameDup only.
    let second = record(0, "Ahmed Ali Hassan", "0199999999", "Mahmoud Ali");
    let flags = find_duplicates(&second, &existing);
    assert!(flags.name);
    assert!(!flags.phone);

    // Different name, same phone, different father -> phoneDup only.
    let third = record(0, "Sara Tarek Fouad", "0100000000", "Different Father");
    let flags = find_duplicates(&third, &existing);
    assert!(flags.phone);
    assert!(!flags.name);
}
