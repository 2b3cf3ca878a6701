//! Id allocator: monotonic sequential codes backed by a counter file.

use academy_player_web::IdAllocator;
use std::fs;

#[test]
fn first_allocation_on_missing_file_is_1() {
    let dir = tempfile::tempdir().unwrap();
    let allocator = IdAllocator::new(dir.path().join("id_counter.txt"));
    assert_eq!(allocator.next_id().unwrap(), 1);
    assert!(allocator.path().exists());
}

#[test]
fn ids_are_strictly_increasing_and_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let allocator = IdAllocator::new(dir.path().join("id_counter.txt"));
    let ids: Vec<u32> = (0..50).map(|_| allocator.next_id().unwrap()).collect();
    let expected: Vec<u32> = (1..=50).collect();
    assert_eq!(ids, expected);
}

#[test]
fn counter_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("id_counter.txt");
    {
        let allocator = IdAllocator::new(&path);
        allocator.next_id().unwrap();
        allocator.next_id().unwrap();
    }
    // A new allocator over the same file continues where the last left off.
    let allocator = IdAllocator::new(&path);
    assert_eq!(allocator.next_id().unwrap(), 3);
}

#[test]
fn counter_file_holds_decimal_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("id_counter.txt");
    let allocator = IdAllocator::new(&path);
    allocator.next_id().unwrap();
    allocator.next_id().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "2");
}

#[test]
fn resumes_from_existing_counter_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("id_counter.txt");
    fs::write(&path, "41").unwrap();
    let allocator = IdAllocator::new(&path);
    assert_eq!(allocator.next_id().unwrap(), 42);
}
