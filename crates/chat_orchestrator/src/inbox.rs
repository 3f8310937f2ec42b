//! Single ordered inbox driving the orchestrator.
//!
//! User commands, completion outcomes, and store snapshots are
//! serialized through one loop, so the subscription can never
//! interleave with a partially-applied command and "the snapshot wins
//! for rendering" stays trivially true.

use tokio::sync::mpsc;

use crate::client::ClientError;
use crate::orchestrator::ChatOrchestrator;

/// Commands accepted by the orchestrator loop.
#[derive(Debug, Clone)]
pub enum OrchestratorCommand {
    /// Submit user input. Rejected, not queued, while a completion is
    /// in flight.
    Submit(String),
    /// Clear the rendered view (display-only).
    ResetView,
    /// Seed the conversation with the fixed greeting.
    StartConversation,
}

/// Run the orchestrator until the command channel closes, then return
/// it with the final session state.
///
/// Submissions dispatch the gateway call onto a task and the outcome
/// re-enters the inbox, so a Submit arriving mid-flight is processed
/// immediately and rejected by the phase guard.
pub async fn run(
    mut orchestrator: ChatOrchestrator,
    mut commands: mpsc::UnboundedReceiver<OrchestratorCommand>,
) -> ChatOrchestrator {
    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel::<Result<String, ClientError>>();
    let mut snapshots = orchestrator.subscribe_store();

    // Hydrate from the store before accepting commands: a returning
    // user's persisted history renders immediately, not on next append.
    if let Some(rx) = snapshots.as_mut() {
        let turns = rx.borrow_and_update().clone();
        orchestrator.apply_snapshot(turns);
    }

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                match command {
                    OrchestratorCommand::Submit(text) => {
                        if let Some((history, config)) = orchestrator.begin_submission(&text).await {
                            let client = orchestrator.client();
                            let tx = outcome_tx.clone();
                            tokio::spawn(async move {
                                let result = client.complete(history, config).await;
                                let _ = tx.send(result);
                            });
                        }
                    }
                    OrchestratorCommand::ResetView => {
                        orchestrator.reset_view();
                        // Snapshots published before the reset are stale;
                        // mark them seen so they cannot repopulate the view.
                        if let Some(rx) = snapshots.as_mut() {
                            let _ = rx.borrow_and_update();
                        }
                    }
                    OrchestratorCommand::StartConversation => {
                        orchestrator.start_conversation().await
                    }
                }
            }
            outcome = outcomes.recv() => {
                if let Some(outcome) = outcome {
                    orchestrator.finish_completion(outcome).await;
                }
            }
            changed = async {
                match snapshots.as_mut() {
                    Some(rx) => rx.changed().await,
                    None => std::future::pending().await,
                }
            } => {
                if changed.is_ok() {
                    if let Some(rx) = snapshots.as_mut() {
                        let turns = rx.borrow_and_update().clone();
                        orchestrator.apply_snapshot(turns);
                    }
                }
            }
        }
    }

    // Drain the final snapshot so the rendered view matches the store.
    if let Some(rx) = snapshots.as_mut() {
        if rx.has_changed().unwrap_or(false) {
            let turns = rx.borrow_and_update().clone();
            orchestrator.apply_snapshot(turns);
        }
    }

    orchestrator
}
