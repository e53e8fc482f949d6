//! Conversation state for the chat screen.
//!
//! The reducer below is the single source of truth for what the active thread
//! shows while the server may lag or fail. The user's message is appended
//! optimistically before any network I/O; the server outcome is reconciled
//! afterwards. The display list is append-only: entries are never reordered
//! or removed except by a full replacement on session switch.
//!
//! Send lifecycle per active session: `Idle -> Sending -> (Settled | Failed)
//! -> Idle`. Input is enabled only in `Idle`. A completion carrying a session
//! id that no longer matches the current session is dropped, so navigating
//! away from a session mid-send never contaminates another thread.

use std::rc::Rc;

use yew::Reducible;

use super::ids::entry_id;
use crate::types::{ChatEntry, ChatSession, PersistedMessage};

pub const GREETING_TEXT: &str = "Hi there! How can I help you today?";
pub const FALLBACK_TEXT: &str = "Sorry, I'm having trouble connecting to the server.";
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

const MENU_WIDTH: i32 = 150;
const MENU_HEIGHT: i32 = 50;
const MENU_MARGIN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
    Settled,
    Failed,
}

/// Session-title update to push to the server after the first settled
/// exchange. Picked up by the view, which reports back with
/// [`ChatAction::TitleRequestTaken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRequest {
    pub session_id: String,
    pub title: String,
}

/// What to activate after a session is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteFallback {
    KeepCurrent,
    Select(String),
    CreateNew,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub sessions: Vec<ChatSession>,
    pub current_session_id: Option<String>,
    pub entries: Vec<ChatEntry>,
    pub send_state: SendState,
    /// Set the moment a title update is issued for the current session, so
    /// the update fires at most once per session lifetime even if the call
    /// itself fails. Reset on session creation and on switch.
    pub title_requested: bool,
    pub title_request: Option<TitleRequest>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            current_session_id: None,
            entries: vec![greeting_entry()],
            send_state: SendState::Idle,
            title_requested: false,
            title_request: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    /// Initial session list arrived; the first one becomes active.
    SessionsLoaded(Vec<ChatSession>),
    /// A freshly created session: head insert, active, greeting thread.
    SessionCreated(ChatSession),
    SelectSession(String),
    HistoryLoaded {
        session_id: String,
        messages: Vec<PersistedMessage>,
    },
    HistoryFailed {
        session_id: String,
    },
    /// Optimistic append of the user's message; enters `Sending`.
    BeginSend {
        text: String,
    },
    /// Successful reply for the named session.
    Settle {
        session_id: String,
        response: String,
        intent: Option<String>,
    },
    /// Failed send for the named session.
    Fail {
        session_id: String,
    },
    /// Leave a terminal send state and re-enter `Idle`.
    Finish,
    /// The view took ownership of the pending title request.
    TitleRequestTaken,
    /// The title update succeeded; patch the sidebar entry.
    TitleUpdated {
        session_id: String,
        title: String,
    },
    RemoveSession(String),
}

impl ChatState {
    /// Deletion is refused while a send is in flight; the thread the reply
    /// belongs to would otherwise vanish under it.
    pub fn can_delete(&self) -> bool {
        self.send_state != SendState::Sending
    }

    pub fn is_sending(&self) -> bool {
        self.send_state == SendState::Sending
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.active)
    }

    pub fn session_title(&self, session_id: &str) -> Option<&str> {
        self.sessions
            .iter()
            .find(|s| s.id == session_id)
            .map(|s| s.title.as_str())
    }

    /// Decide what to activate once `deleted_id` is removed: the current
    /// session if it survives, else the next remaining one, else a brand-new
    /// session.
    pub fn delete_fallback(&self, deleted_id: &str) -> DeleteFallback {
        if self.current_session_id.as_deref() != Some(deleted_id) {
            return DeleteFallback::KeepCurrent;
        }
        match self.sessions.iter().find(|s| s.id != deleted_id) {
            Some(next) => DeleteFallback::Select(next.id.clone()),
            None => DeleteFallback::CreateNew,
        }
    }

    fn mark_active(&mut self, session_id: &str) {
        for session in &mut self.sessions {
            session.active = session.id == session_id;
        }
    }

    fn reset_for_switch(&mut self) {
        self.send_state = SendState::Idle;
        self.title_requested = false;
        self.title_request = None;
    }
}

impl Reducible for ChatState {
    type Action = ChatAction;

    fn reduce(self: Rc<Self>, action: ChatAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ChatAction::SessionsLoaded(mut sessions) => {
                for (index, session) in sessions.iter_mut().enumerate() {
                    session.active = index == 0;
                }
                next.current_session_id = sessions.first().map(|s| s.id.clone());
                next.sessions = sessions;
                next.reset_for_switch();
            }
            ChatAction::SessionCreated(mut session) => {
                session.active = true;
                for existing in &mut next.sessions {
                    existing.active = false;
                }
                next.current_session_id = Some(session.id.clone());
                next.sessions.insert(0, session);
                next.entries = vec![greeting_entry()];
                next.reset_for_switch();
            }
            ChatAction::SelectSession(session_id) => {
                next.mark_active(&session_id);
                next.current_session_id = Some(session_id);
                next.reset_for_switch();
            }
            ChatAction::HistoryLoaded {
                session_id,
                messages,
            } => {
                if next.current_session_id.as_deref() == Some(session_id.as_str()) {
                    let expanded = expand_history(&messages);
                    next.entries = if expanded.is_empty() {
                        vec![greeting_entry()]
                    } else {
                        expanded
                    };
                }
            }
            ChatAction::HistoryFailed { session_id } => {
                // Silent degrade: an unreadable history renders as a fresh
                // thread rather than an error state.
                if next.current_session_id.as_deref() == Some(session_id.as_str()) {
                    next.entries = vec![greeting_entry()];
                }
            }
            ChatAction::BeginSend { text } => {
                if next.send_state == SendState::Idle {
                    next.entries.push(ChatEntry {
                        id: entry_id("user"),
                        text,
                        is_user: true,
                        intent: None,
                    });
                    next.send_state = SendState::Sending;
                }
            }
            ChatAction::Settle {
                session_id,
                response,
                intent,
            } => {
                let current = next.current_session_id.as_deref() == Some(session_id.as_str());
                if next.send_state == SendState::Sending && current {
                    let intent = intent.filter(|tag| !tag.is_empty());
                    next.entries.push(ChatEntry {
                        id: entry_id("bot"),
                        text: response,
                        is_user: false,
                        intent: intent.clone(),
                    });
                    next.send_state = SendState::Settled;
                    if let Some(tag) = intent {
                        if !next.title_requested {
                            next.title_requested = true;
                            next.title_request = Some(TitleRequest {
                                session_id,
                                title: derive_title(&tag),
                            });
                        }
                    }
                }
            }
            ChatAction::Fail { session_id } => {
                let current = next.current_session_id.as_deref() == Some(session_id.as_str());
                if next.send_state == SendState::Sending && current {
                    next.entries.push(ChatEntry {
                        id: entry_id("error"),
                        text: FALLBACK_TEXT.to_string(),
                        is_user: false,
                        intent: None,
                    });
                    next.send_state = SendState::Failed;
                }
            }
            ChatAction::Finish => {
                if matches!(next.send_state, SendState::Settled | SendState::Failed) {
                    next.send_state = SendState::Idle;
                }
            }
            ChatAction::TitleRequestTaken => {
                next.title_request = None;
            }
            ChatAction::TitleUpdated { session_id, title } => {
                if let Some(session) = next.sessions.iter_mut().find(|s| s.id == session_id) {
                    session.title = title;
                }
            }
            ChatAction::RemoveSession(session_id) => {
                next.sessions.retain(|s| s.id != session_id);
            }
        }
        Rc::new(next)
    }
}

pub fn greeting_entry() -> ChatEntry {
    ChatEntry {
        id: entry_id("greeting"),
        text: GREETING_TEXT.to_string(),
        is_user: false,
        intent: Some("greeting".to_string()),
    }
}

/// Derive a session title from an intent tag: underscores become spaces and
/// each word is capitalized ("anxiety_support" -> "Anxiety Support").
pub fn derive_title(intent: &str) -> String {
    intent
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expand server records into display entries: user turn first, then the bot
/// reply, skipping whichever side is empty.
pub fn expand_history(messages: &[PersistedMessage]) -> Vec<ChatEntry> {
    let mut entries = Vec::new();
    for msg in messages {
        if !msg.message.is_empty() {
            entries.push(ChatEntry {
                id: format!("user-{}", msg.id),
                text: msg.message.clone(),
                is_user: true,
                intent: None,
            });
        }
        if !msg.response.is_empty() {
            entries.push(ChatEntry {
                id: format!("bot-{}", msg.id),
                text: msg.response.clone(),
                is_user: false,
                intent: if msg.intent.is_empty() {
                    None
                } else {
                    Some(msg.intent.clone())
                },
            });
        }
    }
    entries
}

/// Clamp the context-menu anchor so the menu stays inside the viewport.
pub fn clamp_menu_position(x: i32, y: i32, viewport_width: i32, viewport_height: i32) -> (i32, i32) {
    let x = if x + MENU_WIDTH > viewport_width {
        viewport_width - MENU_WIDTH - MENU_MARGIN
    } else {
        x
    };
    let y = if y + MENU_HEIGHT > viewport_height {
        viewport_height - MENU_HEIGHT - MENU_MARGIN
    } else {
        y
    };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: ChatState, action: ChatAction) -> ChatState {
        (*Rc::new(state).reduce(action)).clone()
    }

    fn session(id: &str, title: &str) -> ChatSession {
        ChatSession {
            id: id.to_string(),
            title: title.to_string(),
            created_at: None,
            last_updated: None,
            active: false,
        }
    }

    fn record(id: &str, message: &str, response: &str, intent: &str) -> PersistedMessage {
        PersistedMessage {
            id: id.to_string(),
            message: message.to_string(),
            response: response.to_string(),
            intent: intent.to_string(),
        }
    }

    fn state_with_session(id: &str) -> ChatState {
        apply(
            ChatState::default(),
            ChatAction::SessionsLoaded(vec![session(id, "New Chat")]),
        )
    }

    #[test]
    fn default_state_shows_single_greeting() {
        let state = ChatState::default();
        assert_eq!(state.entries.len(), 1);
        assert!(!state.entries[0].is_user);
        assert_eq!(state.entries[0].text, GREETING_TEXT);
        assert_eq!(state.send_state, SendState::Idle);
    }

    #[test]
    fn begin_send_appends_user_entry_before_any_response() {
        let state = state_with_session("a");
        let state = apply(
            state,
            ChatAction::BeginSend {
                text: "I feel anxious".to_string(),
            },
        );

        let last = state.entries.last().unwrap();
        assert!(last.is_user);
        assert_eq!(last.text, "I feel anxious");
        assert_eq!(state.send_state, SendState::Sending);
    }

    #[test]
    fn begin_send_is_ignored_while_already_sending() {
        let mut state = state_with_session("a");
        state = apply(state, ChatAction::BeginSend { text: "one".to_string() });
        let before = state.entries.len();
        state = apply(state, ChatAction::BeginSend { text: "two".to_string() });
        assert_eq!(state.entries.len(), before);
    }

    #[test]
    fn settle_appends_bot_entry_with_intent() {
        let mut state = state_with_session("a");
        state = apply(state, ChatAction::BeginSend { text: "hi".to_string() });
        state = apply(
            state,
            ChatAction::Settle {
                session_id: "a".to_string(),
                response: "hello".to_string(),
                intent: Some("greeting".to_string()),
            },
        );

        let last = state.entries.last().unwrap();
        assert!(!last.is_user);
        assert_eq!(last.text, "hello");
        assert_eq!(last.intent.as_deref(), Some("greeting"));
        assert_eq!(state.send_state, SendState::Settled);

        let state = apply(state, ChatAction::Finish);
        assert_eq!(state.send_state, SendState::Idle);
    }

    #[test]
    fn failed_send_keeps_user_entry_and_appends_one_fallback() {
        let mut state = state_with_session("a");
        state = apply(state, ChatAction::BeginSend { text: "hi".to_string() });
        state = apply(state, ChatAction::Fail { session_id: "a".to_string() });

        let len = state.entries.len();
        assert!(state.entries[len - 2].is_user);
        assert_eq!(state.entries[len - 2].text, "hi");
        let fallbacks: Vec<_> = state
            .entries
            .iter()
            .filter(|e| e.text == FALLBACK_TEXT)
            .collect();
        assert_eq!(fallbacks.len(), 1);
        assert_eq!(state.send_state, SendState::Failed);

        let state = apply(state, ChatAction::Finish);
        assert_eq!(state.send_state, SendState::Idle);
    }

    #[test]
    fn stale_settle_for_departed_session_is_dropped() {
        let mut state = apply(
            ChatState::default(),
            ChatAction::SessionsLoaded(vec![session("a", "A"), session("b", "B")]),
        );
        state = apply(state, ChatAction::BeginSend { text: "hi".to_string() });
        state = apply(state, ChatAction::SelectSession("b".to_string()));
        let before = state.entries.clone();

        state = apply(
            state,
            ChatAction::Settle {
                session_id: "a".to_string(),
                response: "late reply".to_string(),
                intent: None,
            },
        );

        assert_eq!(state.entries, before);
        assert_eq!(state.send_state, SendState::Idle);
    }

    #[test]
    fn switching_sessions_fully_replaces_the_thread() {
        let mut state = apply(
            ChatState::default(),
            ChatAction::SessionsLoaded(vec![session("a", "A"), session("b", "B")]),
        );
        state = apply(
            state,
            ChatAction::HistoryLoaded {
                session_id: "a".to_string(),
                messages: vec![record("1", "old question", "old answer", "")],
            },
        );
        assert_eq!(state.entries.len(), 2);

        state = apply(state, ChatAction::SelectSession("b".to_string()));
        state = apply(
            state,
            ChatAction::HistoryLoaded {
                session_id: "b".to_string(),
                messages: vec![record("9", "new question", "new answer", "")],
            },
        );

        assert_eq!(state.entries.len(), 2);
        assert!(state.entries.iter().all(|e| !e.text.contains("old")));
        let active: Vec<_> = state.sessions.iter().filter(|s| s.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "b");
    }

    #[test]
    fn stale_history_for_departed_session_is_dropped() {
        let mut state = apply(
            ChatState::default(),
            ChatAction::SessionsLoaded(vec![session("a", "A"), session("b", "B")]),
        );
        state = apply(state, ChatAction::SelectSession("b".to_string()));
        let before = state.entries.clone();
        state = apply(
            state,
            ChatAction::HistoryLoaded {
                session_id: "a".to_string(),
                messages: vec![record("1", "late", "late", "")],
            },
        );
        assert_eq!(state.entries, before);
    }

    #[test]
    fn empty_history_renders_exactly_one_greeting() {
        let mut state = state_with_session("a");
        state = apply(
            state,
            ChatAction::HistoryLoaded {
                session_id: "a".to_string(),
                messages: vec![],
            },
        );

        assert_eq!(state.entries.len(), 1);
        assert!(!state.entries[0].is_user);
        assert_eq!(state.entries[0].text, GREETING_TEXT);
    }

    #[test]
    fn failed_history_degrades_to_greeting() {
        let mut state = state_with_session("a");
        state = apply(
            state,
            ChatAction::HistoryLoaded {
                session_id: "a".to_string(),
                messages: vec![record("1", "q", "a", "")],
            },
        );
        state = apply(state, ChatAction::HistoryFailed { session_id: "a".to_string() });

        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entries[0].text, GREETING_TEXT);
    }

    #[test]
    fn persisted_record_expands_to_user_then_bot() {
        let entries = expand_history(&[record("m1", "hi", "hello", "greeting")]);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_user);
        assert_eq!(entries[0].text, "hi");
        assert!(!entries[1].is_user);
        assert_eq!(entries[1].text, "hello");
        assert_eq!(entries[1].intent.as_deref(), Some("greeting"));
    }

    #[test]
    fn one_sided_records_expand_to_single_entries() {
        let entries = expand_history(&[
            record("m1", "only question", "", ""),
            record("m2", "", "only answer", ""),
        ]);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_user);
        assert!(!entries[1].is_user);
    }

    #[test]
    fn title_request_fires_once_per_session_lifetime() {
        let mut state = state_with_session("a");
        state = apply(state, ChatAction::BeginSend { text: "hi".to_string() });
        state = apply(
            state,
            ChatAction::Settle {
                session_id: "a".to_string(),
                response: "hello".to_string(),
                intent: Some("anxiety_support".to_string()),
            },
        );

        assert_eq!(
            state.title_request,
            Some(TitleRequest {
                session_id: "a".to_string(),
                title: "Anxiety Support".to_string(),
            })
        );

        state = apply(state, ChatAction::TitleRequestTaken);
        state = apply(state, ChatAction::Finish);
        state = apply(state, ChatAction::BeginSend { text: "more".to_string() });
        state = apply(
            state,
            ChatAction::Settle {
                session_id: "a".to_string(),
                response: "again".to_string(),
                intent: Some("anxiety_support".to_string()),
            },
        );

        assert_eq!(state.title_request, None);
    }

    #[test]
    fn title_flag_resets_on_new_session() {
        let mut state = state_with_session("a");
        state = apply(state, ChatAction::BeginSend { text: "hi".to_string() });
        state = apply(
            state,
            ChatAction::Settle {
                session_id: "a".to_string(),
                response: "hello".to_string(),
                intent: Some("greeting".to_string()),
            },
        );
        assert!(state.title_requested);

        state = apply(state, ChatAction::SessionCreated(session("b", "New Chat")));
        assert!(!state.title_requested);
        assert_eq!(state.title_request, None);
    }

    #[test]
    fn settle_without_intent_requests_no_title() {
        let mut state = state_with_session("a");
        state = apply(state, ChatAction::BeginSend { text: "hi".to_string() });
        state = apply(
            state,
            ChatAction::Settle {
                session_id: "a".to_string(),
                response: "hello".to_string(),
                intent: Some(String::new()),
            },
        );
        assert_eq!(state.title_request, None);
        assert!(!state.title_requested);
    }

    #[test]
    fn title_update_patches_sidebar_entry() {
        let mut state = apply(
            ChatState::default(),
            ChatAction::SessionsLoaded(vec![session("a", "New Chat")]),
        );
        state = apply(
            state,
            ChatAction::TitleUpdated {
                session_id: "a".to_string(),
                title: "Anxiety Support".to_string(),
            },
        );
        assert_eq!(state.session_title("a"), Some("Anxiety Support"));
    }

    #[test]
    fn new_session_is_inserted_at_head_and_active() {
        let mut state = apply(
            ChatState::default(),
            ChatAction::SessionsLoaded(vec![session("a", "A")]),
        );
        state = apply(state, ChatAction::SessionCreated(session("b", "New Chat")));

        assert_eq!(state.sessions[0].id, "b");
        assert!(state.sessions[0].active);
        assert!(!state.sessions[1].active);
        assert_eq!(state.current_session_id.as_deref(), Some("b"));
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entries[0].text, GREETING_TEXT);
    }

    #[test]
    fn deleting_active_session_activates_next_remaining() {
        let state = apply(
            ChatState::default(),
            ChatAction::SessionsLoaded(vec![session("a", "A"), session("b", "B")]),
        );

        assert_eq!(
            state.delete_fallback("a"),
            DeleteFallback::Select("b".to_string())
        );

        let state = apply(state, ChatAction::RemoveSession("a".to_string()));
        let state = apply(state, ChatAction::SelectSession("b".to_string()));

        let active: Vec<_> = state.sessions.iter().filter(|s| s.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "b");
    }

    #[test]
    fn deleting_last_session_requires_a_new_one() {
        let state = state_with_session("a");
        assert_eq!(state.delete_fallback("a"), DeleteFallback::CreateNew);

        let state = apply(state, ChatAction::RemoveSession("a".to_string()));
        let state = apply(state, ChatAction::SessionCreated(session("fresh", "New Chat")));

        let active: Vec<_> = state.sessions.iter().filter(|s| s.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "fresh");
    }

    #[test]
    fn deleting_inactive_session_keeps_current() {
        let state = apply(
            ChatState::default(),
            ChatAction::SessionsLoaded(vec![session("a", "A"), session("b", "B")]),
        );
        assert_eq!(state.delete_fallback("b"), DeleteFallback::KeepCurrent);
    }

    #[test]
    fn delete_is_refused_mid_send() {
        let mut state = state_with_session("a");
        assert!(state.can_delete());
        state = apply(state, ChatAction::BeginSend { text: "hi".to_string() });
        assert!(!state.can_delete());
    }

    #[test]
    fn derive_title_replaces_underscores_and_capitalizes() {
        assert_eq!(derive_title("anxiety_support"), "Anxiety Support");
        assert_eq!(derive_title("greeting"), "Greeting");
        assert_eq!(derive_title("deep_breathing_exercise"), "Deep Breathing Exercise");
    }

    #[test]
    fn menu_position_is_clamped_to_viewport() {
        assert_eq!(clamp_menu_position(100, 100, 1920, 1080), (100, 100));
        assert_eq!(clamp_menu_position(1900, 100, 1920, 1080), (1760, 100));
        assert_eq!(clamp_menu_position(100, 1070, 1920, 1080), (100, 1020));
    }
}
