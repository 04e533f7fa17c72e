#[cfg(test)]
#[path = "kusho_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GenerationPrompt;
use crate::domain::models::TestCase;
use crate::domain::models::TestGenerator;

const SOURCE_HEADER: &str = "X-KUSHO-SOURCE";
const SOURCE_NAME: &str = "kushogen";

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ApiInfo {
    method: String,
    url: String,
    headers: BTreeMap<String, String>,
    path_params: BTreeMap<String, String>,
    json_body: serde_json::Value,
    api_desc: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GenerateRequest {
    machine_id: String,
    api_info: ApiInfo,
    test_suite_name: String,
}

pub struct Kusho {
    url: String,
    timeout: String,
}

impl Default for Kusho {
    fn default() -> Kusho {
        return Kusho {
            url: Config::get(ConfigKey::KushoURL),
            timeout: Config::get(ConfigKey::KushoHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl TestGenerator for Kusho {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("KushoAI URL is not defined");
        }

        // The hosted endpoint has no index route worth probing. Only health
        // check self-hosted proxies.
        if self.url == "https://be.kusho.ai" {
            return Ok(());
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "KushoAI is not reachable");
            bail!("KushoAI is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "KushoAI health check failed");
            bail!("KushoAI health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn generate<'a>(
        &self,
        prompt: GenerationPrompt,
        tx: &'a mpsc::UnboundedSender<TestCase>,
    ) -> Result<()> {
        let req = GenerateRequest {
            machine_id: prompt.machine_id,
            api_info: ApiInfo {
                method: prompt.method,
                url: prompt.url,
                headers: prompt.headers,
                path_params: prompt.path_params,
                json_body: prompt.json_body,
                api_desc: prompt.description,
            },
            test_suite_name: prompt.test_suite_name,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/vscode/generate/streaming", url = self.url))
            .header("Content-Type", "application/json")
            .header(SOURCE_HEADER, SOURCE_NAME)
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make generation request to KushoAI"
            );
            bail!("Failed to make generation request to KushoAI");
        }

        // StreamReader buffers a trailing partial line until the next chunk,
        // so records that straddle chunk boundaries arrive intact.
        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        loop {
            let line = match lines_reader.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => return Err(err.into()),
            };

            let mut cleaned_line = line.trim().to_string();
            if !cleaned_line.starts_with("data:") {
                continue;
            }
            cleaned_line = cleaned_line.split_off(5).trim().to_string();
            if cleaned_line.is_empty() {
                continue;
            }

            match serde_json::from_str::<TestCase>(&cleaned_line) {
                Ok(test_case) => {
                    tracing::debug!(uuid = test_case.uuid, "received test case");
                    tx.send(test_case)?;
                }
                Err(err) => {
                    // One bad record must not sink the rest of the stream.
                    tracing::warn!(error = ?err, "skipping malformed test case line");
                }
            }
        }

        return Ok(());
    }
}
