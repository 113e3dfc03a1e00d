//! Concurrent sessions

use std::sync::Arc;

use crate::conversation::Conversation;
use crate::conversation::tests::{conversation, time_in};
use crate::session::{SessionId, State};

/// Runs the entry command followed by `cities` on its own task
fn spawn_flow(
    conversation: &Arc<Conversation>,
    session: SessionId,
    cities: &'static [&'static str],
) -> tokio::task::JoinHandle<Vec<String>> {
    let conversation = conversation.clone();
    tokio::spawn(async move {
        let mut replies = conversation.handle(session, "/start").await.unwrap();
        for city in cities {
            replies.extend(conversation.handle(session, city).await.unwrap());
        }
        replies
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sessions_do_not_interfere() {
    let conversation = Arc::new(conversation());

    let valid: Vec<_> = (0..16).map(|user| SessionId::new(100, user)).collect();
    let invalid: Vec<_> = (0..16).map(|user| SessionId::new(-200, user)).collect();

    let valid_flows: Vec<_> = valid
        .iter()
        .map(|session| spawn_flow(&conversation, *session, &["Paris", "Tokyo", "Paris"]))
        .collect();
    let invalid_flows: Vec<_> = invalid
        .iter()
        .map(|session| {
            spawn_flow(
                &conversation,
                *session,
                &["Qwxyzzy123", "Atlantis", "Flakyville"],
            )
        })
        .collect();

    for flow in valid_flows {
        let replies = flow.await.unwrap();
        assert_eq!(replies.len(), 5);
        time_in(&replies[2], "Paris");
        time_in(&replies[3], "Tokyo");
        time_in(&replies[4], "Paris");
    }

    for flow in invalid_flows {
        let replies = flow.await.unwrap();
        assert_eq!(replies.len(), 5);
        for reply in &replies[2..] {
            assert_eq!(
                reply,
                "Sorry, I couldn't recognize that city. Please enter another city name."
            );
        }
    }

    for session in valid {
        assert_eq!(
            conversation.state(session).await,
            Some(State::AwaitingNextCity)
        );
    }
    for session in invalid {
        assert_eq!(
            conversation.state(session).await,
            Some(State::AwaitingFirstCity)
        );
    }
}

#[tokio::test]
async fn users_sharing_a_chat_are_separate() {
    let conversation = conversation();
    let alice = SessionId::new(-300, 1);
    let bob = SessionId::new(-300, 2);

    conversation.handle(alice, "/start").await.unwrap();

    // Bob never started his own conversation
    let replies = conversation.handle(bob, "Paris").await.unwrap();
    assert!(replies.is_empty());
    assert_eq!(conversation.state(bob).await, None);
    assert_eq!(
        conversation.state(alice).await,
        Some(State::AwaitingFirstCity)
    );

    conversation.handle(bob, "/start").await.unwrap();
    let replies = conversation.handle(bob, "Tokyo").await.unwrap();
    assert!(replies[0].ends_with("If you want to check another city, please enter its name."));

    // Alice still gets her first city wording
    let replies = conversation.handle(alice, "Paris").await.unwrap();
    assert!(replies[0].ends_with("If you want to check another city, please enter its name."));
    assert_eq!(
        conversation.state(alice).await,
        Some(State::AwaitingNextCity)
    );
    assert_eq!(conversation.state(bob).await, Some(State::AwaitingNextCity));
}

#[tokio::test]
async fn restart_of_one_session_keeps_others() {
    let conversation = conversation();
    let first = SessionId::new(1, 1);
    let second = SessionId::new(2, 2);

    for session in [first, second] {
        conversation.handle(session, "/start").await.unwrap();
        conversation.handle(session, "Tokyo").await.unwrap();
    }

    conversation.handle(first, "/start").await.unwrap();

    assert_eq!(
        conversation.state(first).await,
        Some(State::AwaitingFirstCity)
    );
    assert_eq!(
        conversation.state(second).await,
        Some(State::AwaitingNextCity)
    );
}
