//! Conversation state machine
//!
//! Each session starts with the entry command and then loops asking for city names. The first
//! successful answer is worded differently and moves the session to its steady state, which it
//! never leaves until restarted.

use thiserror::Error;
use tracing::{debug, info, instrument};


use crate::clock::{self, FormattedTime};
use crate::geo::LocationResolver;
use crate::session::{SessionId, Sessions, State};
use crate::strings::Strings;
use crate::timezone::{TimezoneId, TimezoneResolver};

/// Name of the command starting or restarting a conversation
pub const ENTRY_COMMAND: &str = "start";

const CITY_PROMPT: &str = "Please enter a city name:";

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    Clock(#[from] clock::Error),
}

/// Inbound text message, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound<'a> {
    /// Entry command
    Start,
    /// Any other command, not handled
    Command(&'a str),
    /// City name, trimmed
    City(&'a str),
}

impl<'a> Inbound<'a> {
    /// Classifies a raw message text
    ///
    /// Command names are case insensitive. A command may carry a payload (`/start ref`) and be
    /// addressed to a bot (`/start@some_bot`) - when `bot_username` is known, commands addressed to
    /// other bots are not treated as the entry command.
    pub fn classify(text: &'a str, bot_username: Option<&str>) -> Self {
        let text = text.trim();
        let Some(command) = text.strip_prefix('/') else {
            return Self::City(text);
        };

        let command = command.split_whitespace().next().unwrap_or_default();
        let (command, addressee) = match command.split_once('@') {
            Some((command, addressee)) => (command, Some(addressee)),
            None => (command, None),
        };

        let for_us = match (addressee, bot_username) {
            (Some(addressee), Some(username)) => addressee.eq_ignore_ascii_case(username),
            _ => true,
        };

        if for_us && command.eq_ignore_ascii_case(ENTRY_COMMAND) {
            Self::Start
        } else {
            Self::Command(command)
        }
    }
}

/// Runs the resolution pipeline for all sessions
pub struct Conversation {
    strings: Strings,
    bot_username: Option<String>,
    locations: LocationResolver,
    timezones: TimezoneResolver,
    sessions: Sessions,
}

impl Conversation {
    pub fn new(strings: Strings, locations: LocationResolver, timezones: TimezoneResolver) -> Self {
        Self {
            strings,
            bot_username: None,
            locations,
            timezones,
            sessions: Sessions::new(),
        }
    }

    /// Sets username of the bot, so commands addressed to other bots can be told apart
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Current state of the session, `None` if it never received the entry command
    pub async fn state(&self, session: SessionId) -> Option<State> {
        self.sessions.state(session).await
    }

    /// Handles a message sent to a session, returning replies in sending order
    ///
    /// Messages of a single session have to be handled one at a time. Unsupported commands and text
    /// sent before the entry command produce no replies.
    #[instrument(skip(self))]
    pub async fn handle(&self, session: SessionId, text: &str) -> Result<Vec<String>, Error> {
        let city = match Inbound::classify(text, self.bot_username.as_deref()) {
            Inbound::Start => {
                self.sessions.reset(session).await;
                info!("Conversation started");
                return Ok(vec![
                    self.strings.welcome_message.clone(),
                    CITY_PROMPT.to_owned(),
                ]);
            }
            Inbound::Command(command) => {
                debug!(command, "Unsupported command");
                return Ok(vec![]);
            }
            Inbound::City(city) => city,
        };

        let Some(state) = self.sessions.state(session).await else {
            debug!("Message outside of conversation");
            return Ok(vec![]);
        };

        let time = match self.resolve(city).await {
            Some(tz) => Some(clock::format_current_time(&tz)?),
            None => None,
        };

        let (reply, next) = Self::reply(state, city, time.as_ref());
        self.sessions.transition(session, next).await;
        info!(?state, ?next, resolved = time.is_some(), "City handled");

        Ok(vec![reply])
    }

    /// City name to its zone
    async fn resolve(&self, city: &str) -> Option<TimezoneId> {
        let coord = self.locations.resolve_location(city).await?;
        self.timezones.resolve_timezone(coord)
    }

    /// Reply and next state for a city query outcome
    fn reply(state: State, city: &str, time: Option<&FormattedTime>) -> (String, State) {
        use State::*;

        match (state, time) {
            (AwaitingFirstCity, None) => (
                "Sorry, I couldn't recognize that city. Please enter another city name.".to_owned(),
                AwaitingFirstCity,
            ),
            (AwaitingFirstCity, Some(time)) => (
                format!(
                    "The time in {city} is {time}.\n\nIf you want to check another city, please enter its name."
                ),
                AwaitingNextCity,
            ),
            (AwaitingNextCity, None) => (
                format!(
                    "Sorry, I couldn't recognize {city} as a city. Please enter another city name."
                ),
                AwaitingNextCity,
            ),
            (AwaitingNextCity, Some(time)) => {
                (format!("The time in {city} is {time}."), AwaitingNextCity)
            }
        }
    }
}
