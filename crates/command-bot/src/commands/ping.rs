//! Latency and uptime commands.

use crate::error::CommandError;
use crate::platform::Embed;
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    fn id(&self) -> CommandId {
        CommandId::Ping
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        // Sender clocks drift; never report a negative latency.
        let latency = (Utc::now() - ctx.message.sent_at).num_milliseconds().max(0);
        let embed = Embed::new("🏓 Ping", 0x00FFFF).description(format!("Latency: {}ms", latency));
        ctx.reply(embed).await
    }
}

pub struct UptimeHandler;

/// `N minutes and M seconds`.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{} minutes and {} seconds", secs / 60, secs % 60)
}

#[async_trait]
impl CommandHandler for UptimeHandler {
    fn id(&self) -> CommandId {
        CommandId::Uptime
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        let uptime = ctx.started_at.elapsed();
        ctx.reply(format!(
            "Bot has been online for {}.",
            format_uptime(uptime)
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, expect_reply};
    use crate::platform::{InboundMessage, Reply};

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::ZERO), "0 minutes and 0 seconds");
        assert_eq!(format_uptime(Duration::from_millis(125_900)), "2 minutes and 5 seconds");
        assert_eq!(format_uptime(Duration::from_secs(3600)), "60 minutes and 0 seconds");
    }

    #[tokio::test(start_paused = true)]
    async fn test_uptime_reports_elapsed() {
        let platform = expect_reply(|reply| {
            *reply == Reply::from("Bot has been online for 2 minutes and 5 seconds.")
        });
        let ctx = context(platform, InboundMessage::new("+1555", "!uptime"));

        tokio::time::advance(Duration::from_secs(125)).await;
        UptimeHandler.execute(&ctx, &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_measures_from_send_time() {
        let platform = expect_reply(|reply| {
            let text = reply.render();
            let ms: i64 = text
                .split("Latency: ")
                .nth(1)
                .and_then(|rest| rest.strip_suffix("ms"))
                .and_then(|n| n.parse().ok())
                .unwrap_or(-1);
            (1500..60_000).contains(&ms)
        });
        let sent_at = Utc::now() - chrono::Duration::milliseconds(1500);
        let message = InboundMessage::new("+1555", "!ping").with_sent_at(sent_at);
        let ctx = context(platform, message);

        PingHandler.execute(&ctx, &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_clamps_future_timestamps() {
        let platform = expect_reply(|reply| reply.render().ends_with("Latency: 0ms"));
        let sent_at = Utc::now() + chrono::Duration::seconds(30);
        let message = InboundMessage::new("+1555", "!ping").with_sent_at(sent_at);
        let ctx = context(platform, message);

        PingHandler.execute(&ctx, &[]).await.unwrap();
    }
}
