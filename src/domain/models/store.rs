use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::FieldPair;
use super::RequestBody;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFolderPayload {
    #[serde(rename = "parentId")]
    pub parent_id: String,
    pub name: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "parentId")]
    pub parent_id: String,
    pub name: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub url: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<FieldPair>>,
    pub body: RequestBody,
    #[serde(rename = "pathParameters", skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<Vec<FieldPair>>,
    pub name: String,
    pub description: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequestPayload {
    #[serde(rename = "requestType")]
    pub request_type: String,
    #[serde(rename = "parentId")]
    pub parent_id: String,
    pub req: RequestPayload,
}

/// The workspace persistence collaborator. Folder creation is a submit
/// followed by polling `folder_result`, matching how the store reports
/// completion asynchronously.
#[async_trait]
pub trait WorkspaceStore {
    async fn submit_folder(&self, payload: CreateFolderPayload) -> Result<()>;

    /// Returns the folder created by the last `submit_folder` once the store
    /// has finished writing it.
    async fn folder_result(&self) -> Option<Folder>;

    /// Persists one request and returns its generated id.
    async fn create_request(&self, payload: CreateRequestPayload) -> Result<String>;
}

pub type StoreBox = Arc<dyn WorkspaceStore + Send + Sync>;
