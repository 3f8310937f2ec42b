use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};
use tokio::time::timeout;

use chat_core::persona::{CONNECTION_FAILURE_APOLOGY, GREETING, MISSING_RESPONSE_APOLOGY};
use chat_core::{ChatHistoryEntry, GenerationConfig, Sender};
use chat_orchestrator::{
    run, ChatOrchestrator, ClientError, CompletionClient, OrchestratorCommand,
};
use chat_state::SessionPhase;
use conversation_store::{ConversationStore, Identity, MemoryTurnStorage, TurnStorage};

/// Returns a fixed reply and records what it was asked.
struct StaticClient {
    reply: String,
    calls: Arc<AtomicUsize>,
    last_history: Arc<Mutex<Option<Vec<ChatHistoryEntry>>>>,
}

impl StaticClient {
    fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Arc::new(AtomicUsize::new(0)),
            last_history: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl CompletionClient for StaticClient {
    async fn complete(
        &self,
        chat_history: Vec<ChatHistoryEntry>,
        _config: GenerationConfig,
    ) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history.lock().unwrap() = Some(chat_history);
        Ok(self.reply.clone())
    }
}

struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    async fn complete(
        &self,
        _chat_history: Vec<ChatHistoryEntry>,
        _config: GenerationConfig,
    ) -> Result<String, ClientError> {
        Err(ClientError::Status {
            status: 500,
            body: "gateway exploded".to_string(),
        })
    }
}

struct MissingTextClient;

#[async_trait]
impl CompletionClient for MissingTextClient {
    async fn complete(
        &self,
        _chat_history: Vec<ChatHistoryEntry>,
        _config: GenerationConfig,
    ) -> Result<String, ClientError> {
        Err(ClientError::MissingText)
    }
}

/// Blocks inside `complete` until released, to hold the session in
/// AwaitingCompletion.
struct GatedClient {
    reply: String,
    gate: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CompletionClient for GatedClient {
    async fn complete(
        &self,
        _chat_history: Vec<ChatHistoryEntry>,
        _config: GenerationConfig,
    ) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.reply.clone())
    }
}

async fn wait_for_store_len(store: &ConversationStore, len: usize) {
    let mut rx = store.subscribe();
    timeout(Duration::from_secs(5), async {
        loop {
            if rx.borrow_and_update().len() >= len {
                break;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("store never reached expected turn count");
}

#[tokio::test]
async fn test_submit_appends_user_and_assistant_turns() {
    let client = Arc::new(StaticClient::new("Who is this? I'm rather busy."));
    let mut orchestrator = ChatOrchestrator::local(client.clone());

    orchestrator.start_conversation().await;
    orchestrator.submit_turn("Hello, this is Alex from Nexlify.").await;

    let turns = orchestrator.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].sender, Sender::Ai);
    assert_eq!(turns[0].text, GREETING);
    assert_eq!(turns[1].sender, Sender::User);
    assert_eq!(turns[1].text, "Hello, this is Alex from Nexlify.");
    assert_eq!(turns[2].sender, Sender::Ai);
    assert_eq!(turns[2].text, "Who is this? I'm rather busy.");
    assert_eq!(orchestrator.phase(), &SessionPhase::Idle);
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_context_window_layout() {
    let client = Arc::new(StaticClient::new("Make it quick."));
    let mut orchestrator = ChatOrchestrator::local(client.clone());

    orchestrator.start_conversation().await;
    orchestrator.submit_turn("Do you have a minute?").await;

    let history = client.last_history.lock().unwrap().clone().unwrap();
    // Persona first, prior turns in order, current prompt last.
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].role, "user");
    assert!(history[0].text().contains("Thompson"));
    assert_eq!(history[1].role, "model");
    assert_eq!(history[1].text(), GREETING);
    assert_eq!(history[2].role, "user");
    assert_eq!(history[2].text(), "Do you have a minute?");
}

#[tokio::test]
async fn test_empty_submission_is_a_noop() {
    let client = Arc::new(StaticClient::new("unused"));
    let mut orchestrator = ChatOrchestrator::local(client.clone());

    orchestrator.submit_turn("   ").await;
    orchestrator.submit_turn("").await;

    assert!(orchestrator.turns().is_empty());
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    assert_eq!(orchestrator.phase(), &SessionPhase::Idle);
}

#[tokio::test]
async fn test_gateway_failure_substitutes_apology() {
    let mut orchestrator = ChatOrchestrator::local(Arc::new(FailingClient));

    let before = orchestrator.turns().len();
    orchestrator.submit_turn("Quick pitch for you.").await;

    let turns = orchestrator.turns();
    // The prompt still gets a response: user turn plus the apology.
    assert_eq!(turns.len(), before + 2);
    assert_eq!(turns[turns.len() - 1].sender, Sender::Ai);
    assert_eq!(turns[turns.len() - 1].text, CONNECTION_FAILURE_APOLOGY);
    assert_eq!(orchestrator.phase(), &SessionPhase::Idle);
}

#[tokio::test]
async fn test_missing_text_substitutes_generation_apology() {
    let mut orchestrator = ChatOrchestrator::local(Arc::new(MissingTextClient));

    orchestrator.submit_turn("Anyone there?").await;

    let turns = orchestrator.turns();
    assert_eq!(turns[turns.len() - 1].text, MISSING_RESPONSE_APOLOGY);
    assert_eq!(orchestrator.phase(), &SessionPhase::Idle);
}

#[tokio::test]
async fn test_late_completion_after_reset_is_discarded() {
    let client = Arc::new(StaticClient::new("late reply"));
    let mut orchestrator = ChatOrchestrator::local(client);

    let dispatch = orchestrator.begin_submission("Hello?").await;
    assert!(dispatch.is_some());
    assert_eq!(orchestrator.phase(), &SessionPhase::AwaitingCompletion);

    orchestrator.reset_view();
    orchestrator
        .finish_completion(Ok("late reply".to_string()))
        .await;

    assert!(orchestrator.turns().is_empty());
    assert_eq!(orchestrator.phase(), &SessionPhase::Idle);
}

#[tokio::test]
async fn test_store_backed_flow_renders_from_subscription() {
    let storage = Arc::new(MemoryTurnStorage::new());
    let store = Arc::new(
        ConversationStore::open(storage, "default-app-id", Identity::new("anon-test"))
            .await
            .unwrap(),
    );
    let client = Arc::new(StaticClient::new("We're doing fine as we are."));
    let orchestrator = ChatOrchestrator::with_store(client, store.clone());

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run(orchestrator, rx));

    tx.send(OrchestratorCommand::StartConversation).unwrap();
    tx.send(OrchestratorCommand::Submit(
        "Hi, I'm calling about your online presence.".to_string(),
    ))
    .unwrap();

    wait_for_store_len(&store, 3).await;
    drop(tx);
    let orchestrator = handle.await.unwrap();

    let persisted = store.turns().await.unwrap();
    assert_eq!(persisted.len(), 3);
    assert_eq!(persisted[0].sender, Sender::Ai);
    assert_eq!(persisted[1].sender, Sender::User);
    assert_eq!(persisted[2].sender, Sender::Ai);
    assert_eq!(persisted[2].text, "We're doing fine as we are.");

    // The rendered view equals the store's ordered contents.
    assert_eq!(orchestrator.turns(), persisted.as_slice());
    assert_eq!(orchestrator.phase(), &SessionPhase::Idle);
}

#[tokio::test]
async fn test_existing_history_is_rendered_on_startup() {
    let storage = Arc::new(MemoryTurnStorage::new());
    storage
        .append_turn("default-app-id", "anon-test", Sender::Ai, "old greeting")
        .await
        .unwrap();
    storage
        .append_turn("default-app-id", "anon-test", Sender::User, "old pitch")
        .await
        .unwrap();

    let store = Arc::new(
        ConversationStore::open(storage, "default-app-id", Identity::new("anon-test"))
            .await
            .unwrap(),
    );
    let client = Arc::new(StaticClient::new("unused"));
    let orchestrator = ChatOrchestrator::with_store(client, store.clone());

    let (tx, rx) = mpsc::unbounded_channel::<OrchestratorCommand>();
    let handle = tokio::spawn(run(orchestrator, rx));

    // No commands: a returning user sees their history untouched.
    drop(tx);
    let orchestrator = handle.await.unwrap();

    let persisted = store.turns().await.unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(orchestrator.turns(), persisted.as_slice());
    assert_eq!(orchestrator.turns()[0].text, "old greeting");
    assert_eq!(orchestrator.turns()[1].text, "old pitch");
}

#[tokio::test]
async fn test_submission_while_in_flight_is_rejected_not_queued() {
    let storage = Arc::new(MemoryTurnStorage::new());
    let store = Arc::new(
        ConversationStore::open(storage, "default-app-id", Identity::new("anon-test"))
            .await
            .unwrap(),
    );
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let client = Arc::new(GatedClient {
        reply: "One at a time, please.".to_string(),
        gate: gate.clone(),
        calls: calls.clone(),
    });
    let orchestrator = ChatOrchestrator::with_store(client, store.clone());

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run(orchestrator, rx));

    tx.send(OrchestratorCommand::Submit("First pitch".to_string()))
        .unwrap();
    wait_for_store_len(&store, 1).await;

    // Arrives while the first completion is held open; rejected.
    tx.send(OrchestratorCommand::Submit("Second pitch".to_string()))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    gate.notify_one();

    wait_for_store_len(&store, 2).await;
    drop(tx);
    let orchestrator = handle.await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let persisted = store.turns().await.unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[0].text, "First pitch");
    assert_eq!(persisted[1].text, "One at a time, please.");
    assert_eq!(orchestrator.phase(), &SessionPhase::Idle);
}

#[tokio::test]
async fn test_reset_clears_view_but_not_store() {
    let storage = Arc::new(MemoryTurnStorage::new());
    let store = Arc::new(
        ConversationStore::open(storage, "default-app-id", Identity::new("anon-test"))
            .await
            .unwrap(),
    );
    let client = Arc::new(StaticClient::new("Goodbye."));
    let orchestrator = ChatOrchestrator::with_store(client, store.clone());

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run(orchestrator, rx));

    tx.send(OrchestratorCommand::StartConversation).unwrap();
    tx.send(OrchestratorCommand::Submit("Last question.".to_string()))
        .unwrap();
    wait_for_store_len(&store, 3).await;

    tx.send(OrchestratorCommand::ResetView).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(tx);
    let orchestrator = handle.await.unwrap();

    // Display-only reset: persisted history survives in full.
    assert_eq!(store.turns().await.unwrap().len(), 3);
    assert!(orchestrator.turns().is_empty());
    assert_eq!(orchestrator.phase(), &SessionPhase::Idle);
}
