//! Integration tests for the public ring API.
//!
//! ## Test Organization
//!
//! 1. **Construction** - collect, clone, equality across index types
//! 2. **Editing** - positions and cursors driving insert/erase
//! 3. **Search** - find_key ranges used to visit every occurrence
//! 4. **Algorithms** - end-to-end pipelines

use keyed_ring::{CapacityError, Position, Ring, filter, join, shuffle, unique};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_index_types_behave_alike() {
    let narrow: Ring<u32, u32, u16> = (0..100).map(|i| (i, i * i)).collect();
    let wide: Ring<u32, u32, usize> = (0..100).map(|i| (i, i * i)).collect();

    assert_eq!(narrow.len(), wide.len());
    assert!(narrow.iter().eq(wide.iter()));
    assert_eq!(narrow.to_string(), wide.to_string());
}

#[test]
fn test_default_and_extend() {
    let mut ring: Ring<&str, i32> = Ring::default();
    assert!(ring.is_empty());
    ring.extend(vec![("a", 1), ("b", 2)]);
    ring.extend(vec![("a", 3)]);
    assert_eq!(ring.len(), 3);
    assert_eq!(ring.occurrences_of(&"a"), 2);
    assert_eq!(ring.back(), Some((&"a", &3)));
}

#[test]
fn test_capacity_error_is_std_error() {
    let mut ring: Ring<u8, u8, u8> = Ring::new();
    let mut failure: Option<CapacityError<u8, u8>> = None;
    for i in 0..=255u8 {
        if let Err(err) = ring.try_push_back(i, i) {
            failure = Some(err);
            break;
        }
    }
    let err = failure.unwrap();
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.to_string().contains("254"));
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_positions_survive_unrelated_edits() {
    let mut ring: Ring<i32, &str> = Ring::new();
    let one = ring.push_back(1, "one").position();
    let three = ring.push_back(3, "three").position();

    ring.insert(three, 2, "two");
    ring.push_front(0, "zero");
    ring.pop_back();

    assert_eq!(ring.cursor(one).value(), Some(&"one"));
    assert!(!ring.is_valid(three));
    assert_eq!(ring.to_string(), "{ 0 = zero, 1 = one, 2 = two }");
}

#[test]
fn test_cursor_mut_removes_matching_entries() {
    let mut ring: Ring<i32, i32> = (0..10).map(|k| (k % 3, k)).collect();
    let mut cursor = ring.begin_mut();
    while !cursor.is_boundary() {
        if cursor.key() == Some(&1) {
            cursor.erase();
        } else {
            cursor.move_next();
        }
    }
    assert_eq!(ring.occurrences_of(&1), 0);
    assert_eq!(ring.len(), 7);
}

#[test]
fn test_erase_everything_through_returned_cursor() {
    let mut ring: Ring<i32, ()> = (0..5).map(|k| (k, ())).collect();
    let mut at: Position = ring.begin().position();
    while !at.is_boundary() {
        at = ring.erase(at).position();
    }
    assert!(ring.is_empty());
    assert!(ring.begin() == ring.end());
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_find_key_visits_every_occurrence_once() {
    let ring: Ring<char, usize> = "abracadabra".chars().enumerate().map(|(i, c)| (c, i)).collect();
    let end = ring.end();

    let mut hits = Vec::new();
    let mut from = ring.begin();
    while let Some(hit) = ring.find_key(&'a', from.position(), end.position()) {
        hits.push(*hit.value().unwrap());
        from = hit;
        from.move_next();
        if from == end {
            break;
        }
    }
    assert_eq!(hits, vec![0, 3, 5, 7, 10]);
    assert_eq!(ring.occurrences_of(&'a'), hits.len());
}

#[test]
fn test_find_key_wraps_to_search_the_rest_of_the_ring() {
    let ring: Ring<char, usize> = "wxyz".chars().enumerate().map(|(i, c)| (c, i)).collect();
    let y = ring.find(&'y').unwrap();
    let x = y.prev_cursor();

    // From `y` round to `x`: visits y, z, w.
    assert_eq!(ring.find_key(&'w', y.position(), x.position()).unwrap().value(), Some(&0));
    assert!(ring.find_key(&'x', y.position(), x.position()).is_none());
}

// ============================================================================
// Algorithms
// ============================================================================

#[test]
fn test_filter_then_unique_pipeline() {
    let words = ["apple", "avocado", "banana", "apricot", "blueberry", "cherry"];
    let ring: Ring<char, String> = words
        .iter()
        .map(|w| (w.chars().next().unwrap_or(' '), w.to_string()))
        .collect();

    let fruit_ab = filter(&ring, |c| *c != 'c');
    let grouped = unique(&fruit_ab, |_, acc, next| format!("{}+{}", acc, next));
    assert_eq!(
        grouped.to_string(),
        "{ a = apple+avocado+apricot, b = banana+blueberry }"
    );
}

#[test]
fn test_join_and_shuffle_leave_inputs_intact() {
    let first: Ring<&str, i32> = vec![("uno", 1), ("due", 2)].into_iter().collect();
    let second: Ring<&str, i32> = vec![("due", 1), ("tre", 1)].into_iter().collect();
    let first_before = first.clone();
    let second_before = second.clone();

    let joined = join(&first, &second);
    let mixed = shuffle(&first, 2, &second, 1, 2);

    assert_eq!(joined.to_string(), "{ uno = 1, due = 3, tre = 1 }");
    assert_eq!(
        mixed.to_string(),
        "{ uno = 1, due = 2, due = 1, uno = 1, due = 2, tre = 1 }"
    );
    assert_eq!(first, first_before);
    assert_eq!(second, second_before);
}
