#[cfg(test)]
#[path = "request_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(default)]
    pub text: String,
}

impl Default for RequestBody {
    fn default() -> RequestBody {
        return RequestBody {
            mime_type: "application/json".to_string(),
            text: "".to_string(),
        };
    }
}

/// The source request tests are generated for, in the workspace store's own
/// shape.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "parentId", default)]
    pub parent_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: Vec<FieldPair>,
    #[serde(rename = "pathParameters", default)]
    pub path_parameters: Vec<FieldPair>,
    #[serde(default)]
    pub body: RequestBody,
}

impl SourceRequest {
    pub async fn load(file_path: &path::Path) -> Result<SourceRequest> {
        if !file_path.exists() {
            bail!(format!(
                "No request file found at {}",
                file_path.to_string_lossy()
            ));
        }

        let payload = fs::read_to_string(file_path).await?;
        let request: SourceRequest = serde_yaml::from_str(&payload)?;

        return Ok(request);
    }
}
