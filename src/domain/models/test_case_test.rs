use anyhow::Result;

use super::TestCase;

#[test]
fn it_parses_a_full_record() -> Result<()> {
    let test_case: TestCase = serde_json::from_str(&test_utils::test_case_fixture("a"))?;

    assert_eq!(test_case.uuid, "a");
    assert_eq!(test_case.test_suite_id, 42);
    assert_eq!(test_case.description, "Returns the user for a valid id");
    assert_eq!(test_case.categories, vec!["positive".to_string()]);
    assert_eq!(test_case.types, vec!["functional".to_string()]);
    assert_eq!(test_case.request.method, "GET");
    assert_eq!(test_case.request.url, "https://api.x/u/1");
    assert_eq!(
        test_case.request.headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert_eq!(test_case.id, "");
    assert_eq!(test_case.source_request_id, None);

    return Ok(());
}

#[test]
fn it_tolerates_missing_fields() -> Result<()> {
    let test_case: TestCase = serde_json::from_str(r#"{"uuid": "b"}"#)?;

    assert_eq!(test_case.uuid, "b");
    assert_eq!(test_case.test_suite_id, 0);
    assert!(test_case.categories.is_empty());
    assert!(test_case.request.headers.is_empty());
    assert!(test_case.request.json_body.is_null());

    return Ok(());
}

#[test]
fn it_rejects_malformed_json() {
    let res = serde_json::from_str::<TestCase>("{\"uuid\": ");
    assert!(res.is_err());
}
