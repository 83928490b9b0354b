//! Conversation controller — the submit → match → delay → append loop.
//!
//! Explicit two-state machine per conversation:
//!
//! - `Idle --submit(non-empty)--> AwaitingReply` (user message appended)
//! - `AwaitingReply --delay elapsed--> Idle` (bot message appended)
//! - `submit` while `AwaitingReply` is rejected, which keeps at most one
//!   reply in flight and preserves strict user → bot ordering per turn.
//!
//! Teardown (`close` or drop) cancels the pending delay and reply task, so
//! no bot message is ever appended for a cancelled turn.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::matcher::IntentMatcher;
use crate::transcript::{Message, Transcript};
use crate::typing::{DelayCanceller, TypingDelay};

/// Engine-visible conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Idle,
    AwaitingReply,
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::AwaitingReply => "awaiting_reply",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a [`Conversation::submit`] call. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input accepted; a reply is now pending.
    Accepted,
    /// Trimmed input was empty; nothing happened.
    IgnoredEmpty,
    /// A reply is already pending; the input was dropped.
    RejectedBusy,
}

/// Change notification emitted after every transcript append.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    MessageAppended { message: Message },
}

/// Shared mutable conversation state. Writers are `submit` and the single
/// in-flight reply task; the state flag guarantees there is at most one.
struct Inner {
    log: Transcript,
    state: ConversationState,
}

/// Handles for the in-flight reply turn.
struct PendingReply {
    delay: DelayCanceller,
    task: JoinHandle<()>,
}

impl PendingReply {
    fn cancel(&self) {
        self.delay.cancel();
        self.task.abort();
    }
}

/// A single scripted conversation. Owns its transcript and state flag
/// exclusively; nothing is shared across conversation instances.
pub struct Conversation {
    matcher: Arc<IntentMatcher>,
    typing: TypingDelay,
    inner: Arc<RwLock<Inner>>,
    events: broadcast::Sender<ConversationEvent>,
    pending: Option<PendingReply>,
}

impl Conversation {
    /// Create a conversation with the built-in rule table.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_matcher(config, IntentMatcher::with_default_rules())
    }

    /// Create a conversation with a custom matcher.
    pub fn with_matcher(config: EngineConfig, matcher: IntentMatcher) -> Self {
        let log = if config.greeting.is_empty() {
            Transcript::new()
        } else {
            Transcript::seeded(Message::bot(&config.greeting))
        };
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            matcher: Arc::new(matcher),
            typing: TypingDelay::new(config.typing_delay_min, config.typing_delay_max),
            inner: Arc::new(RwLock::new(Inner {
                log,
                state: ConversationState::Idle,
            })),
            events,
            pending: None,
        }
    }

    /// Submit user input.
    ///
    /// On acceptance the user message is appended immediately and the bot
    /// reply is committed once the typing delay elapses. Empty input and
    /// input submitted while a reply is pending are dropped, not errors.
    pub async fn submit(&mut self, text: &str) -> Result<SubmitOutcome> {
        if text.trim().is_empty() {
            debug!("Empty input ignored");
            return Ok(SubmitOutcome::IgnoredEmpty);
        }

        let mut guard = self.inner.write().await;
        if guard.state == ConversationState::AwaitingReply {
            debug!("Reply already pending, input dropped");
            return Ok(SubmitOutcome::RejectedBusy);
        }

        let user = Message::user(text);
        guard.log.append(user.clone())?;
        guard.state = ConversationState::AwaitingReply;
        drop(guard);
        let _ = self.events.send(ConversationEvent::MessageAppended { message: user });

        let delay = self.typing.schedule();
        let canceller = delay.canceller();
        let inner = Arc::clone(&self.inner);
        let matcher = Arc::clone(&self.matcher);
        let events = self.events.clone();
        let text = text.to_string();

        let task = tokio::spawn(async move {
            if !delay.elapsed().await {
                debug!("Typing delay cancelled, turn abandoned");
                return;
            }
            let reply = Message::bot(matcher.respond(&text));
            let mut guard = inner.write().await;
            match guard.log.append(reply.clone()) {
                Ok(()) => {
                    guard.state = ConversationState::Idle;
                    drop(guard);
                    let _ = events.send(ConversationEvent::MessageAppended { message: reply });
                }
                Err(e) => {
                    // Cannot happen with the controller as sole writer.
                    error!(error = %e, "Failed to append bot reply");
                    guard.state = ConversationState::Idle;
                }
            }
        });
        self.pending = Some(PendingReply {
            delay: canceller,
            task,
        });

        Ok(SubmitOutcome::Accepted)
    }

    /// Snapshot of the transcript for rendering.
    pub async fn messages(&self) -> Vec<Message> {
        self.inner.read().await.log.snapshot()
    }

    /// Current state.
    pub async fn state(&self) -> ConversationState {
        self.inner.read().await.state
    }

    /// Whether a bot reply is pending (consumers disable input meanwhile).
    pub async fn is_awaiting_reply(&self) -> bool {
        self.state().await == ConversationState::AwaitingReply
    }

    /// Subscribe to change notifications. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }

    /// Tear the conversation down, cancelling any pending reply.
    ///
    /// A cancelled turn never appends its bot message. The conversation
    /// should be discarded afterwards.
    pub fn close(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
            debug!("Pending reply cancelled on close");
        }
    }

    /// Starter questions for consumers to render as suggestion chips.
    pub fn suggested_questions() -> &'static [&'static str] {
        crate::rules::SUGGESTED_QUESTIONS
    }
}

impl Drop for Conversation {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}
