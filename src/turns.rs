use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One chat message as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub sender: Sender,
    pub text: String,
}

/// Render one turn as a message bubble.
///
/// Only assistant text goes through the markup renderer. User text is escaped
/// and inserted literally.
pub fn render_turn(turn: &Turn, config: &Config) -> String {
    let class = match turn.sender {
        Sender::User => &config.turns.user_class,
        Sender::Ai => &config.turns.ai_class,
    };

    let mut out = String::from("<div class=\"");
    encode_double_quoted_attribute_to_string(class, &mut out);
    out.push_str("\">");
    match turn.sender {
        Sender::User => {
            encode_text_to_string(&turn.text, &mut out);
        }
        Sender::Ai => out.push_str(&crate::render_with_config(&turn.text, config)),
    }
    out.push_str("</div>");
    out
}

/// Render turns in order.
pub fn render_transcript(turns: &[Turn], config: &Config) -> String {
    turns.iter().map(|turn| render_turn(turn, config)).collect()
}
