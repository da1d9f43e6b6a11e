use tracing::error;

use crate::parser;
use crate::projector::Projector;

const START_REPLY: &str = "Hello! Send me an event name and participants list.";

const HELP_REPLY: &str = "Hello! Here's how you can use this bot:\n\
- To log an event, send the event name, date, and participant list with a $ sign between \
each field and a comma between names. For example:\n\
  EventName$28/02/2024$John, Jane Doe, Well S\n\
- Use /start to restart the bot.\n\
- Use /help to display this message again.";

const GREETING_REPLY: &str = "Hello! Please send me the event name and date followed by the \
participants' list, with a $ sign between each field and a comma between names. For example: \
'EventName$28/02/2024$John, Jane Doe, Well S'.";

const FORMAT_HELP_REPLY: &str =
    "Incorrect format. Please use the format 'EventName$Date$Participant1, Participant2, ...'";

const FAILURE_REPLY: &str = "Failed to log the event.";

const GREETING_WORDS: [&str; 3] = ["hello", "hi", "hey"];

/// Which kind of chat a message arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Direct,
    Group,
}

/// The router's view of one inbound text message.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub kind: ChatKind,
    pub text: String,
}

/// Thin presentation glue: decides whether a message is addressed to the
/// bot, answers commands and greetings itself, and forwards everything
/// submission-shaped to the projector.
pub struct Router {
    projector: Projector,
    /// Lowercased, `@`-prefixed bot handle, e.g. `@events_attendings_bot`.
    handle: String,
}

impl Router {
    pub fn new(projector: Projector, bot_handle: &str) -> Self {
        let mut handle = bot_handle.trim().to_ascii_lowercase();
        if !handle.starts_with('@') {
            handle.insert(0, '@');
        }
        Self { projector, handle }
    }

    /// Produce the reply for one message, or `None` when the message must
    /// be silently ignored (unaddressed group chatter).
    pub async fn handle(&self, msg: &IncomingMessage) -> Option<String> {
        let text = msg.text.trim();
        if text.is_empty() {
            return None;
        }

        // Commands reach the bot in groups even without a mention.
        if let Some(reply) = self.command_reply(text) {
            return Some(reply);
        }

        let addressed = msg.kind == ChatKind::Direct || self.mentioned(text);
        if !addressed {
            return None;
        }

        let payload = self.strip_handle(text);
        let payload = payload.trim();

        match parser::parse(payload) {
            Ok(submission) => match self.projector.project(&submission).await {
                Ok(reply) => Some(reply),
                Err(err) => {
                    error!(error = %err, "Projection failed");
                    Some(FAILURE_REPLY.to_string())
                }
            },
            Err(_) if self.is_greeting(payload) => Some(GREETING_REPLY.to_string()),
            Err(_) => Some(FORMAT_HELP_REPLY.to_string()),
        }
    }

    /// `/start` and `/help`, with an optional `@handle` suffix as Telegram
    /// appends in group chats. Commands aimed at other bots are ignored.
    fn command_reply(&self, text: &str) -> Option<String> {
        let first = text.split_whitespace().next()?;
        if !first.starts_with('/') {
            return None;
        }
        let (command, target) = match first.split_once('@') {
            Some((command, target)) => (command, Some(target)),
            None => (first, None),
        };
        if let Some(target) = target {
            if !self.handle[1..].eq_ignore_ascii_case(target) {
                return None;
            }
        }
        match command {
            "/start" => Some(START_REPLY.to_string()),
            "/help" => Some(HELP_REPLY.to_string()),
            _ => None,
        }
    }

    fn mentioned(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.handle)
    }

    fn is_greeting(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        GREETING_WORDS.iter().any(|word| lower.contains(word))
    }

    /// Remove every occurrence of the bot handle, case-insensitively. The
    /// handle is ASCII, so byte-window comparison stays on char boundaries.
    fn strip_handle(&self, text: &str) -> String {
        let needle = self.handle.as_bytes();
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut skip_until = 0;
        for (idx, ch) in text.char_indices() {
            if idx < skip_until {
                continue;
            }
            if bytes.len() - idx >= needle.len()
                && bytes[idx..idx + needle.len()].eq_ignore_ascii_case(needle)
            {
                skip_until = idx + needle.len();
                continue;
            }
            out.push(ch);
        }
        out
    }
}
