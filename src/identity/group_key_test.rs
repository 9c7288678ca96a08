use std::str::FromStr;

use crate::CacheError;
use crate::Error;
use crate::GroupKey;

/// # Case 1: A well-formed composed key round-trips
///
/// ## Validation criteria
/// 1. All three components land in their fields
/// 2. Display recomposes the original string
#[test]
fn test_parse_case1() {
    let key = GroupKey::parse("message-produce+dynamic-worker-example+prescription").expect("should succeed");

    assert_eq!(key.pool_id, "message-produce");
    assert_eq!(key.item_id, "dynamic-worker-example");
    assert_eq!(key.tenant_id, "prescription");
    assert_eq!(key.to_string(), "message-produce+dynamic-worker-example+prescription");
}

/// # Case 2: Two components are rejected before any cache access
#[test]
fn test_parse_case2() {
    let result = GroupKey::parse("pool1+item1");
    assert!(matches!(
        result,
        Err(Error::Cache(CacheError::MalformedIdentity(_)))
    ));
}

/// # Case 3: Four components are rejected
///
/// A component containing the delimiter would decompose ambiguously, so the
/// parse refuses it instead of guessing.
#[test]
fn test_parse_case3() {
    let result = GroupKey::parse("pool1+item1+tenantA+extra");
    assert!(matches!(
        result,
        Err(Error::Cache(CacheError::MalformedIdentity(_)))
    ));
}

/// # Case 4: Empty components are rejected
#[test]
fn test_parse_case4() {
    assert!(GroupKey::parse("pool1++tenantA").is_err());
    assert!(GroupKey::parse("++").is_err());
    assert!(GroupKey::parse("").is_err());
}

/// # Case 5: Constructor refuses the reserved delimiter inside a component
#[test]
fn test_new_case5() {
    let result = GroupKey::new("pool+1", "item1", "tenantA");
    assert!(matches!(
        result,
        Err(Error::Cache(CacheError::MalformedIdentity(_)))
    ));
}

/// # Case 6: FromStr mirrors parse
#[test]
fn test_from_str_case6() {
    let key = GroupKey::from_str("pool1+item1+tenantA").expect("should succeed");
    assert_eq!(key, GroupKey::new("pool1", "item1", "tenantA").expect("should succeed"));
}
