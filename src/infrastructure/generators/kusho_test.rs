use anyhow::Result;
use tokio::sync::mpsc;

use super::Kusho;
use crate::domain::models::GenerationPrompt;
use crate::domain::models::SourceRequest;
use crate::domain::models::TestCase;
use crate::domain::models::TestGenerator;

impl Kusho {
    fn with_url(url: String) -> Kusho {
        return Kusho {
            url,
            timeout: "200".to_string(),
        };
    }
}

fn prompt() -> GenerationPrompt {
    let request: SourceRequest =
        serde_yaml::from_str(test_utils::source_request_fixture()).unwrap();
    return GenerationPrompt::from_request(&request, "machine-1");
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(200).create();

    let generator = Kusho::with_url(server.url());
    let res = generator.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(500).create();

    let generator = Kusho::with_url(server.url());
    let res = generator.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_streams_test_cases_in_order() -> Result<()> {
    let body = [
        format!("data:{}", test_utils::test_case_fixture("a")),
        "".to_string(),
        "event: progress".to_string(),
        format!("data:{}", test_utils::test_case_fixture("b")),
    ]
    .join("\n");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/vscode/generate/streaming")
        .match_header("Content-Type", "application/json")
        .match_header("X-KUSHO-SOURCE", "kushogen")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "machine_id": "machine-1",
            "test_suite_name": "Get User Tests",
            "api_info": {
                "method": "GET",
                "url": "https://api.x/u",
            },
        })))
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<TestCase>();

    let generator = Kusho::with_url(server.url());
    generator.generate(prompt(), &tx).await?;
    mock.assert();

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();

    assert_eq!(first.uuid, "a");
    assert_eq!(second.uuid, "b");
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[tokio::test]
async fn it_skips_malformed_records() -> Result<()> {
    let body = [
        "data:{\"uuid\": ".to_string(),
        format!("data:{}", test_utils::test_case_fixture("b")),
    ]
    .join("\n");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/vscode/generate/streaming")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<TestCase>();

    let generator = Kusho::with_url(server.url());
    let res = generator.generate(prompt(), &tx).await;
    mock.assert();

    assert!(res.is_ok());
    let only = rx.recv().await.unwrap();
    assert_eq!(only.uuid, "b");
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_error_status() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/vscode/generate/streaming")
        .with_status(500)
        .create();

    let (tx, _rx) = mpsc::unbounded_channel::<TestCase>();

    let generator = Kusho::with_url(server.url());
    let res = generator.generate(prompt(), &tx).await;

    assert!(res.is_err());
    mock.assert();
}
