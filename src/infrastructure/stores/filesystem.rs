#[cfg(test)]
#[path = "filesystem_test.rs"]
mod tests;

use std::path;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CreateFolderPayload;
use crate::domain::models::CreateRequestPayload;
use crate::domain::models::Folder;
use crate::domain::models::RequestPayload;
use crate::domain::models::WorkspaceStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredFolder {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "parentId")]
    parent_id: String,
    name: String,
    timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRequest {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "requestType")]
    request_type: String,
    #[serde(rename = "parentId")]
    parent_id: String,
    req: RequestPayload,
    timestamp: String,
}

/// Workspace persistence as one YAML file per entity, grouped by folder under
/// the scoped workspace directory.
pub struct FilesystemStore {
    pub workspace_dir: path::PathBuf,
    folder: Mutex<Option<Folder>>,
}

impl Default for FilesystemStore {
    fn default() -> FilesystemStore {
        let workspace_dir = path::PathBuf::from(Config::get(ConfigKey::DataDir))
            .join(Config::get(ConfigKey::OrganizationID))
            .join(Config::get(ConfigKey::ProjectID))
            .join(Config::get(ConfigKey::WorkspaceID));

        return FilesystemStore::new(workspace_dir);
    }
}

impl FilesystemStore {
    pub fn new(workspace_dir: path::PathBuf) -> FilesystemStore {
        return FilesystemStore {
            workspace_dir,
            folder: Mutex::new(None),
        };
    }

    fn create_id(prefix: &str) -> String {
        let short = Uuid::new_v4()
            .to_string()
            .split('-')
            .enumerate()
            .filter_map(|(idx, str)| {
                if idx > 1 {
                    return None;
                }
                return Some(str);
            })
            .collect::<Vec<&str>>()
            .join("");

        return format!("{prefix}_{short}");
    }

    async fn write_yaml(&self, file_path: &path::Path, payload: &str) -> Result<()> {
        let parent = file_path.parent();
        if let Some(dir) = parent {
            if !dir.exists() {
                fs::create_dir_all(dir).await?;
            }
        }

        let mut file = fs::File::create(file_path).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }
}

#[async_trait]
impl WorkspaceStore for FilesystemStore {
    #[allow(clippy::implicit_return)]
    async fn submit_folder(&self, payload: CreateFolderPayload) -> Result<()> {
        let folder = Folder {
            id: FilesystemStore::create_id("fld"),
            parent_id: payload.parent_id,
            name: payload.name,
        };

        let stored = StoredFolder {
            id: folder.id.to_string(),
            parent_id: folder.parent_id.to_string(),
            name: folder.name.to_string(),
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };

        let file_path = self.workspace_dir.join(&folder.id).join("folder.yaml");
        self.write_yaml(&file_path, &serde_yaml::to_string(&stored)?)
            .await?;

        *self.folder.lock().unwrap() = Some(folder);
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn folder_result(&self) -> Option<Folder> {
        return self.folder.lock().unwrap().clone();
    }

    #[allow(clippy::implicit_return)]
    async fn create_request(&self, payload: CreateRequestPayload) -> Result<String> {
        let stored = StoredRequest {
            id: FilesystemStore::create_id("req"),
            request_type: payload.request_type,
            parent_id: payload.parent_id,
            req: payload.req,
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };

        let file_path = self
            .workspace_dir
            .join(&stored.parent_id)
            .join(format!("{}.yaml", stored.id));
        self.write_yaml(&file_path, &serde_yaml::to_string(&stored)?)
            .await?;

        return Ok(stored.id);
    }
}
