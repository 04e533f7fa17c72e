#[cfg(test)]
#[path = "test_case_test.rs"]
mod tests;

use std::collections::BTreeMap;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The request descriptor embedded in a streamed test case. The vendor makes
/// no promises about which fields are present, so everything is
/// default-tolerant.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub path_params: BTreeMap<String, String>,
    // Either a pre-wrapped `{mimeType, text}` object or a raw JSON value. The
    // materializer normalizes it.
    #[serde(default)]
    pub json_body: serde_json::Value,
}

/// One generated test case as streamed by the vendor. `id` and
/// `source_request_id` are assigned locally when the record arrives.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub test_suite_id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub request: TestCaseRequest,
    #[serde(default)]
    pub fields: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_request_id: Option<String>,
}
