use serde::{Deserialize, Serialize};

/// A persisted conversation thread, as returned by `GET /chat/sessions`.
///
/// `active` is a client-side overlay: exactly one loaded session carries it at
/// a time. The server never sees it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(skip)]
    pub active: bool,
}

/// One rendered line of the chat thread. `id` is a client-generated token for
/// optimistic entries, or derived from the server record id for history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub intent: Option<String>,
}

/// One server-side message record. A single record holds both the user's turn
/// and the bot's reply; either side may be empty.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PersistedMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub intent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub valid: bool,
    pub user: User,
}

/// Bot reply to a sent message, with the classifier's intent tag if any.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub intent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionList {
    #[serde(default)]
    pub sessions: Vec<ChatSession>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionCreated {
    pub session: ChatSession,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<PersistedMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Playlist {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub spotify_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaylistList {
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

/// Response of the `/health` connectivity probe.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub message: String,
}
