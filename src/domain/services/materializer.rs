#[cfg(test)]
#[path = "materializer_test.rs"]
mod tests;

use std::collections::BTreeMap;

use anyhow::Result;

use crate::domain::models::CreateRequestPayload;
use crate::domain::models::FieldPair;
use crate::domain::models::RequestBody;
use crate::domain::models::RequestPayload;
use crate::domain::models::TestCase;
use crate::domain::models::WorkspaceStore;

fn field_pairs(map: &BTreeMap<String, String>) -> Vec<FieldPair> {
    return map
        .iter()
        .map(|(name, value)| {
            return FieldPair {
                name: name.to_string(),
                value: value.to_string(),
            };
        })
        .collect();
}

/// The vendor sends bodies either pre-wrapped as `{mimeType, text}` or as a
/// raw value whose `text` needs re-serializing. Anything unparsable collapses
/// to an empty JSON body rather than failing the run.
fn normalize_body(json_body: &serde_json::Value) -> RequestBody {
    if let Some(obj) = json_body.as_object() {
        if obj.get("mimeType").and_then(serde_json::Value::as_str) == Some("application/json") {
            if let Some(text) = obj.get("text").and_then(serde_json::Value::as_str) {
                if !text.is_empty() {
                    return RequestBody {
                        mime_type: "application/json".to_string(),
                        text: text.to_string(),
                    };
                }
            }
        }
    }

    let text = json_body
        .get("text")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();

    let normalized = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => value.to_string(),
        Err(_) => "".to_string(),
    };

    return RequestBody {
        mime_type: "application/json".to_string(),
        text: normalized,
    };
}

pub fn build_payload(test_case: &TestCase, folder_id: &str) -> CreateRequestPayload {
    let mut req = RequestPayload {
        url: test_case.request.url.to_string(),
        method: test_case.request.method.to_string(),
        headers: None,
        body: normalize_body(&test_case.request.json_body),
        path_parameters: None,
        name: test_case.description.to_string(),
        description: test_case.description.to_string(),
    };

    if !test_case.request.headers.is_empty() {
        req.headers = Some(field_pairs(&test_case.request.headers));
    }
    if !test_case.request.path_params.is_empty() {
        req.path_parameters = Some(field_pairs(&test_case.request.path_params));
    }

    return CreateRequestPayload {
        request_type: "HTTP".to_string(),
        parent_id: folder_id.to_string(),
        req,
    };
}

/// One store call per test case. No batching, and no rollback when a later
/// test case fails.
pub async fn materialize(
    store: &(dyn WorkspaceStore + Send + Sync),
    test_case: &TestCase,
    folder_id: &str,
) -> Result<String> {
    let payload = build_payload(test_case, folder_id);
    return store.create_request(payload).await;
}
