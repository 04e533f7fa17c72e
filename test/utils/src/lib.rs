pub fn source_request_fixture() -> &'static str {
    return r#"
_id: req_68e46
parentId: wrk_1
name: Get User
description: Fetches a user by id.
method: GET
url: https://api.x/u
headers:
  - name: Accept
    value: application/json
pathParameters: []
body:
  mimeType: application/json
  text: '{"q": 1}'
"#
    .trim();
}

pub fn test_case_fixture(uuid: &str) -> String {
    return format!(
        r#"{{"uuid": "{uuid}", "test_suite_id": 42, "description": "Returns the user for a valid id", "categories": ["positive"], "types": ["functional"], "request": {{"method": "GET", "url": "https://api.x/u/1", "headers": {{"Accept": "application/json"}}, "path_params": {{"id": "1"}}, "json_body": {{"q": 1}}}}, "fields": []}}"#
    );
}
