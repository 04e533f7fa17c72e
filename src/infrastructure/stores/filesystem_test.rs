use anyhow::Result;
use tokio::fs;

use super::FilesystemStore;
use super::StoredRequest;
use crate::domain::models::CreateFolderPayload;
use crate::domain::models::TestCase;
use crate::domain::models::WorkspaceStore;
use crate::domain::services::materializer;

#[tokio::test]
async fn it_creates_a_folder_and_reports_it() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FilesystemStore::new(dir.path().to_path_buf());

    assert!(store.folder_result().await.is_none());

    store
        .submit_folder(CreateFolderPayload {
            parent_id: "wrk_1".to_string(),
            name: "Get User Tests".to_string(),
        })
        .await?;

    let folder = store.folder_result().await.unwrap();
    assert!(folder.id.starts_with("fld_"));
    assert_eq!(folder.name, "Get User Tests");
    assert_eq!(folder.parent_id, "wrk_1");

    let folder_file = dir.path().join(&folder.id).join("folder.yaml");
    assert!(folder_file.exists());

    return Ok(());
}

#[tokio::test]
async fn it_persists_materialized_requests() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FilesystemStore::new(dir.path().to_path_buf());

    let test_case: TestCase =
        serde_json::from_str(&test_utils::test_case_fixture("a")).unwrap();
    let payload = materializer::build_payload(&test_case, "fld_1");

    let id = store.create_request(payload).await?;
    assert!(id.starts_with("req_"));

    let file_path = dir.path().join("fld_1").join(format!("{id}.yaml"));
    let written = fs::read_to_string(&file_path).await?;
    let stored: StoredRequest = serde_yaml::from_str(&written)?;

    assert_eq!(stored.id, id);
    assert_eq!(stored.request_type, "HTTP");
    assert_eq!(stored.parent_id, "fld_1");
    assert_eq!(stored.req.url, "https://api.x/u/1");
    assert_eq!(stored.req.name, "Returns the user for a valid id");

    return Ok(());
}

#[tokio::test]
async fn it_keeps_requests_from_separate_runs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FilesystemStore::new(dir.path().to_path_buf());

    let test_case: TestCase =
        serde_json::from_str(&test_utils::test_case_fixture("a")).unwrap();

    let first = store
        .create_request(materializer::build_payload(&test_case, "fld_1"))
        .await?;
    let second = store
        .create_request(materializer::build_payload(&test_case, "fld_1"))
        .await?;

    assert_ne!(first, second);
    assert!(dir
        .path()
        .join("fld_1")
        .join(format!("{first}.yaml"))
        .exists());
    assert!(dir
        .path()
        .join("fld_1")
        .join(format!("{second}.yaml"))
        .exists());

    return Ok(());
}
