//! Tests for bucket scheme construction and lookup.

use super::aging_model::{AgingBucket, BucketScheme};
use crate::Error;

fn bucket(name: &str, min: Option<i64>, max: Option<i64>) -> AgingBucket {
    AgingBucket::new(name, min, max)
}

// ==================== Validation ====================

#[test]
fn test_builtin_schemes_pass_validation() {
    for scheme in [BucketScheme::standard(), BucketScheme::escalation()] {
        let rebuilt = BucketScheme::new(scheme.name(), scheme.buckets().to_vec()).unwrap();
        assert_eq!(rebuilt, scheme);
    }
}

#[test]
fn test_rejects_empty_scheme() {
    assert!(matches!(
        BucketScheme::new("empty", vec![]),
        Err(Error::InvalidScheme(_))
    ));
    assert!(matches!(
        BucketScheme::new("  ", vec![bucket("all", None, None)]),
        Err(Error::InvalidScheme(_))
    ));
}

#[test]
fn test_rejects_gap_and_overlap() {
    let gap = vec![
        bucket("0-30", Some(0), Some(30)),
        bucket("32+", Some(32), None),
    ];
    assert!(BucketScheme::new("gap", gap).is_err());

    let overlap = vec![
        bucket("0-30", Some(0), Some(30)),
        bucket("30+", Some(30), None),
    ];
    assert!(BucketScheme::new("overlap", overlap).is_err());
}

#[test]
fn test_rejects_closed_last_bucket() {
    let closed = vec![
        bucket("0-30", Some(0), Some(30)),
        bucket("31-60", Some(31), Some(60)),
    ];
    assert!(BucketScheme::new("closed", closed).is_err());
}

#[test]
fn test_rejects_first_bucket_starting_after_zero() {
    let late_start = vec![bucket("5+", Some(5), None)];
    assert!(BucketScheme::new("late", late_start).is_err());
}

#[test]
fn test_rejects_duplicate_names_and_inverted_ranges() {
    let duplicate = vec![
        bucket("a", Some(0), Some(10)),
        bucket("a", Some(11), None),
    ];
    assert!(BucketScheme::new("dup", duplicate).is_err());

    let inverted = vec![
        bucket("a", Some(10), Some(0)),
        bucket("b", Some(1), None),
    ];
    assert!(BucketScheme::new("inverted", inverted).is_err());
}

#[test]
fn test_single_open_bucket_is_valid() {
    let scheme = BucketScheme::new("all", vec![bucket("all", None, None)]).unwrap();
    assert_eq!(scheme.bucket_for(-100).1.name, "all");
    assert_eq!(scheme.bucket_for(10_000).1.name, "all");
}

// ==================== Lookup ====================

#[test]
fn test_bucket_for_first_match_wins() {
    let scheme = BucketScheme::standard();
    assert_eq!(scheme.bucket_for(-5), (0, &scheme.buckets()[0]));
    assert_eq!(scheme.bucket_for(30).1.name, "0-30");
    assert_eq!(scheme.bucket_for(31).1.name, "31-60");
    assert_eq!(scheme.bucket_for(91).1.name, "91+");
}

#[test]
fn test_bucket_for_matches_inclusive_ranges() {
    let scheme = BucketScheme::escalation();
    let expected = [
        (-1, "0-20"),
        (0, "0-20"),
        (20, "0-20"),
        (21, "21-30"),
        (30, "21-30"),
        (31, "31-45"),
        (45, "31-45"),
        (46, "46-90"),
        (90, "46-90"),
        (91, "91+"),
    ];
    for (days, name) in expected {
        assert_eq!(scheme.bucket_for(days).1.name, name, "{days}");
    }
    for days in 0..400 {
        let (index, bucket) = scheme.bucket_for(days);
        assert!(bucket.contains(days), "{days}");
        assert_eq!(&scheme.buckets()[index], bucket);
    }
}

#[test]
fn test_bucket_contains_uses_both_bounds() {
    let scheme = BucketScheme::standard();
    let first = scheme.bucket("0-30").unwrap();
    assert!(first.contains(0));
    assert!(first.contains(30));
    assert!(!first.contains(31));
    assert!(!first.contains(-1));
    assert!(scheme.bucket("91+").unwrap().contains(i64::MAX));
    assert!(scheme.bucket("120+").is_none());
}

// ==================== Serialization ====================

#[test]
fn test_scheme_serializes_camel_case() {
    let json = serde_json::to_value(BucketScheme::standard()).unwrap();
    assert_eq!(json["name"], "standard");
    assert_eq!(json["buckets"][3]["minDays"], 91);
    assert!(json["buckets"][3]["maxDays"].is_null());
}

#[test]
fn test_scheme_deserialization_validates() {
    let bad = r#"{"name": "bad", "buckets": [{"name": "x", "minDays": 0, "maxDays": 10}]}"#;
    assert!(serde_json::from_str::<BucketScheme>(bad).is_err());
}
