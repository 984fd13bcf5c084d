//! Help command - lists the enabled commands.

use crate::error::CommandError;
use crate::platform::Embed;
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;

pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    fn id(&self) -> CommandId {
        CommandId::Help
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        let lines: Vec<String> = ctx
            .catalogue
            .iter()
            .map(|info| format!("**{}{}** - {}", ctx.prefix, info.usage, info.description))
            .collect();

        let embed = Embed::new("Help - Available Commands", 0x00FF99).description(format!(
            "Here's a list of available commands:\n{}",
            lines.join("\n")
        ));
        ctx.reply(embed).await
    }
}
