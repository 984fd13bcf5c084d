//! Timer commands backed by the reminder scheduler.

use crate::error::CommandError;
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;
use std::time::Duration;

/// Longest timer accepted, one day.
const MAX_TIMER_SECS: u64 = 24 * 60 * 60;

pub struct TimerHandler;

#[async_trait]
impl CommandHandler for TimerHandler {
    fn id(&self) -> CommandId {
        CommandId::Timer
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        let seconds = match args.first().and_then(|a| a.parse::<u64>().ok()) {
            Some(seconds) if seconds > 0 && seconds <= MAX_TIMER_SECS => seconds,
            Some(seconds) if seconds > MAX_TIMER_SECS => {
                return ctx
                    .reply_error(format!(
                        "Timers can be at most {} seconds.",
                        MAX_TIMER_SECS
                    ))
                    .await;
            }
            _ => {
                return ctx
                    .reply_error("Please provide a valid number of seconds for the timer.")
                    .await;
            }
        };

        ctx.reply(format!("⏳ Timer set for {} seconds.", seconds))
            .await?;

        let message = &ctx.message;
        ctx.scheduler.schedule(
            &message.author,
            &message.conversation,
            Duration::from_secs(seconds),
            format!(
                "{}, your timer for {} seconds is up!",
                message.display_name(),
                seconds
            )
            .into(),
        );
        Ok(())
    }
}

pub struct CancelTimerHandler;

#[async_trait]
impl CommandHandler for CancelTimerHandler {
    fn id(&self) -> CommandId {
        CommandId::CancelTimer
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        let message = &ctx.message;
        let cancelled = ctx
            .scheduler
            .cancel_owned_by(&message.author, &message.conversation);

        if cancelled == 0 {
            ctx.reply("You have no pending timers.").await
        } else {
            ctx.reply(format!("Cancelled {} timer(s).", cancelled)).await
        }
    }
}
