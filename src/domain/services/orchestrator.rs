#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use uuid::Uuid;

use super::materializer;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::CreateFolderPayload;
use crate::domain::models::Event;
use crate::domain::models::Folder;
use crate::domain::models::GenerationPrompt;
use crate::domain::models::GeneratorBox;
use crate::domain::models::SourceRequest;
use crate::domain::models::StoreBox;
use crate::domain::models::TestCase;
use crate::domain::models::TestGenerator;
use crate::domain::models::WorkspaceStore;

const FOLDER_POLL_INTERVAL: Duration = Duration::from_millis(100);
const FOLDER_POLL_ATTEMPTS: usize = 100;

// Ties the vendor stream task to the run: an aborted run must also stop the
// in-flight network read.
struct StreamTask(JoinHandle<Result<()>>);

impl Drop for StreamTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn await_folder(store: &StoreBox) -> Result<Folder> {
    for _ in 0..FOLDER_POLL_ATTEMPTS {
        if let Some(folder) = store.folder_result().await {
            return Ok(folder);
        }
        time::sleep(FOLDER_POLL_INTERVAL).await;
    }

    bail!("Folder creation timed out");
}

async fn run_generation(
    store: StoreBox,
    generator: GeneratorBox,
    request: SourceRequest,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    generator.health_check().await?;

    tx.send(Event::FolderCreating())?;
    store
        .submit_folder(CreateFolderPayload {
            parent_id: request.parent_id.to_string(),
            name: format!("{} Tests", request.name),
        })
        .await?;

    let folder = await_folder(&store).await?;
    tx.send(Event::FolderReady(folder.id.to_string()))?;

    let prompt = GenerationPrompt::from_request(&request, &Config::get(ConfigKey::MachineID));
    let (case_tx, mut case_rx) = mpsc::unbounded_channel::<TestCase>();

    let stream_generator = generator.clone();
    let mut stream = StreamTask(tokio::spawn(async move {
        return stream_generator.generate(prompt, &case_tx).await;
    }));

    // Strictly sequential: each arrived case is appended to the visible
    // sequence, then materialized, before the next one is consumed.
    let mut count = 0;
    while let Some(mut test_case) = case_rx.recv().await {
        test_case.id = Uuid::new_v4().to_string();
        test_case.source_request_id = Some(request.id.to_string());
        tx.send(Event::TestCaseArrived(test_case.clone()))?;

        let stored_id = materializer::materialize(store.as_ref(), &test_case, &folder.id).await?;
        tracing::debug!(uuid = test_case.uuid, stored_id = stored_id, "materialized test case");
        tx.send(Event::TestCaseStored(stored_id))?;
        count += 1;
    }

    (&mut stream.0).await??;
    tx.send(Event::GenerationDone(count))?;

    return Ok(());
}

pub struct OrchestratorService {}

impl OrchestratorService {
    /// Owns the lifecycle of generation runs. At most one worker runs at a
    /// time; a second invocation is rejected while the current one is live.
    pub async fn start(
        store: StoreBox,
        generator: GeneratorBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                continue;
            }

            match action.unwrap() {
                Action::GenerationAbort() => {
                    worker.abort();
                }
                Action::GenerationStart(request) => {
                    if !worker.is_finished() {
                        tx.send(Event::GenerationRejected(
                            "Please wait for the current test generation to complete."
                                .to_string(),
                        ))?;
                        continue;
                    }
                    if request.url.is_empty() {
                        tx.send(Event::GenerationRejected(
                            "Cannot generate tests: No request data provided.".to_string(),
                        ))?;
                        continue;
                    }

                    let worker_tx = tx.clone();
                    let worker_store = store.clone();
                    let worker_generator = generator.clone();
                    worker = tokio::spawn(async move {
                        let res =
                            run_generation(worker_store, worker_generator, request, &worker_tx)
                                .await;

                        if let Err(err) = res {
                            tracing::error!(error = ?err, "generation run failed");
                            worker_tx.send(Event::GenerationError(err.to_string()))?;
                        }

                        return Ok(());
                    });
                }
            }
        }
    }
}
