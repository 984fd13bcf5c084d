//! Group moderation: remove a member.

use crate::error::CommandError;
use crate::platform::{Capability, Embed};
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;
use tracing::{info, warn};

pub struct KickHandler;

#[async_trait]
impl CommandHandler for KickHandler {
    fn id(&self) -> CommandId {
        CommandId::Kick
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        let message = &ctx.message;

        if !message.has_capability(Capability::KickMembers) {
            return ctx
                .reply_error("You do not have permission to kick members.")
                .await;
        }

        let Some(group) = message.group.as_deref() else {
            return ctx
                .reply_error("This command can only be used in a group.")
                .await;
        };

        let Some(target) = args.first().map(|a| a.trim_start_matches('@')) else {
            return ctx.reply_error("Please mention a user to kick.").await;
        };

        match ctx.platform.remove_member(group, target).await {
            Ok(()) => {
                info!("{} removed {} from {}", message.author, target, group);
                let embed = Embed::new("Member Kicked", 0xFFA500)
                    .description(format!("{} has been removed from the group.", target));
                ctx.reply(embed).await
            }
            Err(e) => {
                warn!("Failed to remove {} from {}: {}", target, group, e);
                ctx.reply_error("Failed to kick the member.").await
            }
        }
    }
}
