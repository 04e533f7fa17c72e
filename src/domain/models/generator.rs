#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::SourceRequest;
use super::TestCase;

/// Everything the vendor needs to generate a test suite for one request.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct GenerationPrompt {
    pub machine_id: String,
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub path_params: BTreeMap<String, String>,
    pub json_body: serde_json::Value,
    pub description: String,
    pub test_suite_name: String,
}

impl GenerationPrompt {
    pub fn from_request(request: &SourceRequest, machine_id: &str) -> GenerationPrompt {
        let headers = request
            .headers
            .iter()
            .map(|pair| {
                return (pair.name.to_string(), pair.value.to_string());
            })
            .collect::<BTreeMap<String, String>>();

        let path_params = request
            .path_parameters
            .iter()
            .map(|pair| {
                return (pair.name.to_string(), pair.value.to_string());
            })
            .collect::<BTreeMap<String, String>>();

        // A stored body that isn't valid JSON must not prevent a run from
        // starting.
        let json_body =
            serde_json::from_str(&request.body.text).unwrap_or(serde_json::Value::Null);

        return GenerationPrompt {
            machine_id: machine_id.to_string(),
            method: request.method.to_string(),
            url: request.url.to_string(),
            headers,
            path_params,
            json_body,
            description: request.description.to_string(),
            test_suite_name: format!("{} Tests", request.name),
        };
    }
}

#[async_trait]
pub trait TestGenerator {
    /// Used at startup to verify all configurations are available to work
    /// with the vendor.
    async fn health_check(&self) -> Result<()>;

    /// Opens the vendor's generation stream and sends each decoded test case
    /// through the channel in arrival order. Returns once the stream
    /// completes.
    async fn generate<'a>(
        &self,
        prompt: GenerationPrompt,
        tx: &'a mpsc::UnboundedSender<TestCase>,
    ) -> Result<()>;
}

pub type GeneratorBox = Arc<dyn TestGenerator + Send + Sync>;
