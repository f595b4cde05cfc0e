//! Chat command handling for updates pushed by the bot API.

use crate::models::telegram::{KeyboardButton, OutgoingMessage, ReplyKeyboardMarkup, Update};
use crate::services::telegram::{Notifier, NotifyError};

pub const MENU_PROMPT: &str = "⚡ Pilih tindakan:";

/// Commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
}

impl Command {
    /// Parse the command word of a message, accepting `/start@BotName` and trailing arguments.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name {
            "start" => Some(Self::Start),
            _ => None,
        }
    }
}

/// Fixed action menu shown in reply to `/start`.
pub fn main_menu() -> OutgoingMessage {
    let row = |labels: [&str; 2]| -> Vec<KeyboardButton> {
        labels.iter().map(|label| KeyboardButton::new(label)).collect()
    };
    OutgoingMessage::plain(MENU_PROMPT).with_keyboard(ReplyKeyboardMarkup {
        keyboard: vec![
            row(["📡 Scan RFID", "🔍 Lihat Data"]),
            row(["✏️ Edit Data", "🗑 Hapus Data"]),
        ],
        resize_keyboard: true,
        one_time_keyboard: false,
    })
}

/// React to one update; returns the command that was handled, if any.
pub async fn handle_update(
    notifier: &dyn Notifier,
    update: &Update,
) -> Result<Option<Command>, NotifyError> {
    let Some(message) = &update.message else {
        return Ok(None);
    };
    let Some(command) = message.text.as_deref().and_then(Command::parse) else {
        return Ok(None);
    };

    match command {
        Command::Start => {
            let chat_id = message.chat.id.to_string();
            notifier.send(&chat_id, &main_menu()).await?;
            tracing::info!(chat_id = %chat_id, "Sent main menu");
        }
    }

    Ok(Some(command))
}
