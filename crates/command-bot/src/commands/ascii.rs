//! Figlet banners.

use crate::error::CommandError;
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;
use figlet_rs::FIGfont;
use tracing::warn;

/// Renders its arguments in the standard figlet font.
pub struct AsciiHandler;

/// Banner for `text` in a code block, or `None` if it cannot be rendered.
pub fn render_banner(text: &str) -> Option<String> {
    let font = match FIGfont::standard() {
        Ok(font) => font,
        Err(e) => {
            warn!("Failed to load figlet font: {}", e);
            return None;
        }
    };
    let figure = font.convert(text)?;
    Some(format!("```\n{}```", figure))
}

#[async_trait]
impl CommandHandler for AsciiHandler {
    fn id(&self) -> CommandId {
        CommandId::Ascii
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        let text = args.join(" ");
        if text.is_empty() {
            return ctx
                .reply_error("Please provide some text for ASCII conversion.")
                .await;
        }

        match render_banner(&text) {
            Some(banner) => ctx.reply(banner).await,
            None => ctx.reply_error("Failed to generate ASCII art.").await,
        }
    }
}
