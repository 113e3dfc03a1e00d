//! Telegram transport

use std::sync::Arc;

use citytime::{Conversation, SessionId};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

/// Serves the conversation until interrupted
///
/// Updates are dispatched per chat, so messages of a single chat are handled in order while
/// different chats progress concurrently. A session is a single user within a chat.
pub async fn serve(bot: Bot, conversation: Arc<Conversation>) {
    let handler = Update::filter_message().endpoint(on_message);

    info!("Dispatching Telegram updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![conversation])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// Session of the message sender within its chat
fn session_of(msg: &Message) -> SessionId {
    match &msg.from {
        Some(user) => SessionId::new(msg.chat.id.0, user.id.0),
        None => SessionId::chat(msg.chat.id.0),
    }
}

/// Routes a message through the conversation and sends back the replies
#[instrument(skip_all, fields(chat = ?msg.chat.id))]
async fn on_message(
    bot: Bot,
    msg: Message,
    conversation: Arc<Conversation>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let replies = match conversation.handle(session_of(&msg), text).await {
        Ok(replies) => replies,
        Err(err) => {
            error!(%err, "Cannot handle message");
            return Ok(());
        }
    };

    for reply in replies {
        bot.send_message(msg.chat.id, reply).await?;
    }

    Ok(())
}
