//! Logging a server kick reason
//!
//! The reason arrives as a chat component: a `text` field plus optional
//! `extra` parts whose control characters are stripped before joining.

use botconsole::{Console, ConsoleOptions};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatComponent {
    #[serde(default)]
    text: String,
    #[serde(default)]
    extra: Vec<ChatComponent>,
}

impl ChatComponent {
    fn plain_text(&self) -> String {
        self.extra.iter().fold(self.text.clone(), |mut message, part| {
            message.extend(part.text.chars().filter(|c| !matches!(c, '\n' | '\t' | '\r')));
            message
        })
    }
}

fn on_kicked(console: &Console, username: &str, reason: &str, logged_in: bool) -> anyhow::Result<()> {
    let component: ChatComponent = serde_json::from_str(reason)?;
    console.log([format!(
        "[{username}] I got kicked from the server. (LoggedIn: {logged_in})\nReason: {}",
        component.plain_text()
    )])?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let console = Console::new(ConsoleOptions::from_env())?;

    let reason = r#"{"text":"You have been kicked: ","extra":[{"text":"Server\n is restarting"},{"text":"\tsee you soon"}]}"#;
    on_kicked(&console, "steve", reason, true)?;

    // Malformed reasons are reported rather than swallowed
    if let Err(err) = on_kicked(&console, "alex", "not json", false) {
        console.error([format!("could not parse kick reason: {err}")])?;
    }

    Ok(())
}
