//! Per chat conversation state

use std::collections::HashMap;

use tokio::sync::RwLock;

/// Conversation identifier assigned by the transport
///
/// A conversation is held with a single user in a single chat, so users sharing a group chat
/// have separate sessions. Messages without a known sender are attributed to the chat itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId {
    chat: i64,
    user: Option<u64>,
}

impl SessionId {
    /// Session of `user` in `chat`
    pub const fn new(chat: i64, user: u64) -> Self {
        Self {
            chat,
            user: Some(user),
        }
    }

    /// Session of a chat with no identifiable sender
    pub const fn chat(chat: i64) -> Self {
        Self { chat, user: None }
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.user {
            Some(user) => write!(f, "{}/{}", self.chat, user),
            None => write!(f, "{}", self.chat),
        }
    }
}

/// Where the conversation is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Greeted, no city resolved yet
    AwaitingFirstCity,
    /// At least one city resolved. Never left.
    AwaitingNextCity,
}

/// Session states keyed by session id
///
/// Sessions only come to existence through `reset`. The lock only guards the map itself - a
/// single session is never touched concurrently as the transport serializes its messages.
///
/// Entries are never evicted: every session that ever received the entry command stays for the
/// lifetime of the process. A session is a single enum value, so the map is left unbounded.
#[derive(Debug, Default)]
pub struct Sessions {
    states: RwLock<HashMap<SessionId, State>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a session, `None` if it was never started
    pub async fn state(&self, session: SessionId) -> Option<State> {
        self.states.read().await.get(&session).copied()
    }

    /// Starts the session over, creating it if needed
    pub async fn reset(&self, session: SessionId) {
        self.states
            .write()
            .await
            .insert(session, State::AwaitingFirstCity);
    }

    /// Moves an existing session to `state`. Unknown sessions are left alone.
    pub async fn transition(&self, session: SessionId, state: State) {
        if let Some(current) = self.states.write().await.get_mut(&session) {
            *current = state;
        }
    }

    /// Number of known sessions
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_lifecycle() {
        let sessions = Sessions::new();
        let session = SessionId::new(7, 70);

        assert!(sessions.is_empty().await);
        assert_eq!(sessions.state(session).await, None);

        // Transition does not create a session
        sessions.transition(session, State::AwaitingNextCity).await;
        assert_eq!(sessions.state(session).await, None);

        sessions.reset(session).await;
        assert_eq!(sessions.state(session).await, Some(State::AwaitingFirstCity));

        sessions.transition(session, State::AwaitingNextCity).await;
        assert_eq!(sessions.state(session).await, Some(State::AwaitingNextCity));

        sessions.reset(session).await;
        assert_eq!(sessions.state(session).await, Some(State::AwaitingFirstCity));
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn users_of_a_chat_are_separate() {
        let sessions = Sessions::new();
        let alice = SessionId::new(-100, 1);
        let bob = SessionId::new(-100, 2);
        let anonymous = SessionId::chat(-100);

        assert_ne!(alice, bob);
        assert_ne!(alice, anonymous);

        sessions.reset(alice).await;
        sessions.transition(alice, State::AwaitingNextCity).await;

        assert_eq!(sessions.state(alice).await, Some(State::AwaitingNextCity));
        assert_eq!(sessions.state(bob).await, None);
        assert_eq!(sessions.state(anonymous).await, None);

        sessions.reset(bob).await;
        assert_eq!(sessions.state(bob).await, Some(State::AwaitingFirstCity));
        assert_eq!(sessions.state(alice).await, Some(State::AwaitingNextCity));
    }

    #[test]
    fn display() {
        assert_eq!(SessionId::new(-100, 42).to_string(), "-100/42");
        assert_eq!(SessionId::chat(-100).to_string(), "-100");
    }
}
