//! Information about members and the current group.

use crate::error::CommandError;
use crate::platform::Embed;
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::warn;

const GROUP_ONLY: &str = "This command can only be used in a group.";

/// Name and number of the sender or a mentioned member.
pub struct UserInfoHandler;

#[async_trait]
impl CommandHandler for UserInfoHandler {
    fn id(&self) -> CommandId {
        CommandId::UserInfo
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        let message = &ctx.message;
        let target = args
            .first()
            .map(|a| a.trim_start_matches('@'))
            .filter(|t| !t.is_empty() && *t != message.author);

        // Only the sender's profile name is known.
        let (name, number) = match target {
            Some(number) => (number, number),
            None => (message.display_name(), message.author.as_str()),
        };

        let embed = Embed::new("User Information", 0x0099FF)
            .field("Name", name)
            .field("Number", number);
        ctx.reply(embed).await
    }
}

/// Name and size of the current group.
pub struct ServerInfoHandler;

#[async_trait]
impl CommandHandler for ServerInfoHandler {
    fn id(&self) -> CommandId {
        CommandId::ServerInfo
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        let Some(group) = ctx.message.group.as_deref() else {
            return ctx.reply_error(GROUP_ONLY).await;
        };

        match ctx.platform.group_info(group).await {
            Ok(info) => {
                let mut embed = Embed::new("Group Information", 0x00FF99)
                    .field("Group Name", info.name)
                    .field("Total Members", info.members.len().to_string())
                    .field("Admins", info.admins.len().to_string());
                if let Some(description) = info.description {
                    embed = embed.description(description);
                }
                ctx.reply(embed).await
            }
            Err(e) => {
                warn!("Group lookup for {} failed: {}", group, e);
                ctx.reply_error("Failed to fetch group information.").await
            }
        }
    }
}

/// Picks a random member of the current group, never the bot.
pub struct RandomPlayerHandler;

#[async_trait]
impl CommandHandler for RandomPlayerHandler {
    fn id(&self) -> CommandId {
        CommandId::RandomPlayer
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        let Some(group) = ctx.message.group.as_deref() else {
            return ctx.reply_error(GROUP_ONLY).await;
        };

        let info = match ctx.platform.group_info(group).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Group lookup for {} failed: {}", group, e);
                return ctx.reply_error("Failed to fetch group members.").await;
            }
        };

        let players: Vec<&String> = info
            .members
            .iter()
            .filter(|member| **member != ctx.bot_id)
            .collect();
        let chosen = players.choose(&mut rand::thread_rng());
        match chosen {
            Some(player) => ctx.reply(format!("Random player: {}", player)).await,
            None => ctx.reply_error("No other members found.").await,
        }
    }
}
