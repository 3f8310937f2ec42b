//! ChatOrchestrator - keeps local and persisted state consistent.

use std::sync::Arc;

use tokio::sync::watch;

use chat_core::persona::{
    CONNECTION_FAILURE_APOLOGY, GREETING, MISSING_RESPONSE_APOLOGY, THOMPSON_PERSONA,
};
use chat_core::{build_chat_history, ChatHistoryEntry, GenerationConfig, Sender, Turn};
use chat_state::{ChatSession, SessionPhase, SubmitDecision};
use conversation_store::ConversationStore;

use crate::client::{ClientError, CompletionClient};

/// Drives the turn-taking loop.
///
/// One orchestrator, optionally backed by a store: absent, turns live
/// purely in the local session; present, all mutations route through
/// the store and assistant turns reach the rendered view only via the
/// store's subscription.
pub struct ChatOrchestrator {
    session: ChatSession,
    client: Arc<dyn CompletionClient>,
    store: Option<Arc<ConversationStore>>,
    persona: String,
    generation: GenerationConfig,
}

impl ChatOrchestrator {
    /// Local-only variant: no persistence, no identity provider.
    pub fn local(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            session: ChatSession::with_identity("local"),
            client,
            store: None,
            persona: THOMPSON_PERSONA.to_string(),
            generation: GenerationConfig::default(),
        }
    }

    /// Store-backed variant for an already-established identity.
    pub fn with_store(client: Arc<dyn CompletionClient>, store: Arc<ConversationStore>) -> Self {
        let session = ChatSession::with_identity(store.user_id());
        Self {
            session,
            client,
            store: Some(store),
            persona: THOMPSON_PERSONA.to_string(),
            generation: GenerationConfig::default(),
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn phase(&self) -> &SessionPhase {
        self.session.phase()
    }

    pub fn turns(&self) -> &[Turn] {
        self.session.turns()
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub(crate) fn client(&self) -> Arc<dyn CompletionClient> {
        Arc::clone(&self.client)
    }

    /// Subscription to the store's ordered turn list, when backed.
    pub fn subscribe_store(&self) -> Option<watch::Receiver<Vec<Turn>>> {
        self.store.as_ref().map(|s| s.subscribe())
    }

    /// Seed a new visible session with the fixed greeting.
    pub async fn start_conversation(&mut self) {
        self.write_assistant_turn(GREETING).await;
    }

    /// Accept or reject a submission.
    ///
    /// On acceptance the user turn is appended (locally, and to the
    /// store when attached) and the assembled history is returned for
    /// dispatch; the session is left in AwaitingCompletion. Rejection
    /// is a silent no-op.
    pub async fn begin_submission(
        &mut self,
        text: &str,
    ) -> Option<(Vec<ChatHistoryEntry>, GenerationConfig)> {
        let (prompt, prior) = match self.session.begin_submission(text) {
            SubmitDecision::Accepted { prompt, prior } => (prompt, prior),
            SubmitDecision::Rejected(reason) => {
                tracing::debug!(?reason, "submission ignored");
                return None;
            }
        };

        // Optimistic local echo; the next snapshot supersedes it.
        self.session.push_turn(Turn::user(&prompt));
        if let Some(store) = &self.store {
            if let Err(e) = store.append(Sender::User, &prompt).await {
                tracing::warn!("failed to mirror user turn to store: {e}");
            }
        }

        let history = build_chat_history(&self.persona, &prior, &prompt);
        self.session.completion_requested();
        Some((history, self.generation))
    }

    /// Apply a completion outcome.
    ///
    /// Whatever the outcome, an assistant turn is written so the log
    /// never ends on an unanswered prompt. A result arriving after a
    /// view reset finds the session outside AwaitingCompletion and is
    /// discarded.
    pub async fn finish_completion(&mut self, result: Result<String, ClientError>) {
        if !matches!(self.session.phase(), SessionPhase::AwaitingCompletion) {
            tracing::debug!("discarding completion result; no completion in flight");
            return;
        }

        match result {
            Ok(text) => {
                self.session.completion_succeeded();
                self.write_assistant_turn(&text).await;
            }
            Err(ClientError::MissingText) => {
                self.session.completion_failed("response carried no aiResponseText");
                self.write_assistant_turn(MISSING_RESPONSE_APOLOGY).await;
            }
            Err(e) => {
                tracing::error!("completion failed: {e}");
                self.session.completion_failed(e.to_string());
                self.write_assistant_turn(CONNECTION_FAILURE_APOLOGY).await;
            }
        }
    }

    /// Submit and await the completion inline.
    ///
    /// Equivalent to a Submit command followed by its outcome; the
    /// inbox loop uses the split form so concurrent submissions are
    /// rejected rather than queued.
    pub async fn submit_turn(&mut self, text: &str) {
        if let Some((history, config)) = self.begin_submission(text).await {
            let result = self.client.complete(history, config).await;
            self.finish_completion(result).await;
        }
    }

    /// Clear the rendered view. Persisted history is untouched; the
    /// store has no delete to call.
    pub fn reset_view(&mut self) {
        self.session.reset_view();
    }

    /// Replace the rendered view with a store snapshot.
    pub fn apply_snapshot(&mut self, turns: Vec<Turn>) {
        self.session.apply_snapshot(turns);
    }

    async fn write_assistant_turn(&mut self, text: &str) {
        match &self.store {
            Some(store) => {
                if let Err(e) = store.append(Sender::Ai, text).await {
                    // Keep the invariant that every prompt gets a
                    // rendered response even when persistence fails.
                    tracing::error!("failed to persist assistant turn: {e}");
                    self.session.push_turn(Turn::ai(text));
                }
            }
            None => self.session.push_turn(Turn::ai(text)),
        }
    }
}
