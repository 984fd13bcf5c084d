//! Small text commands: word count, descriptions and canned answers.

use crate::error::CommandError;
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &["funny", "smart", "brave", "creative", "curious"];

const PREDICTIONS: &[&str] = &[
    "Great success is coming!",
    "Be cautious today.",
    "Expect good news!",
    "You will have an unexpected surprise.",
];

const EIGHT_BALL: &[&str] = &["Yes", "No", "Maybe", "Absolutely", "Certainly not"];

const FORTUNES: &[&str] = &[
    "You will have a great day!",
    "Be careful today.",
    "Success is coming your way!",
    "An unexpected event will happen today.",
];

fn pick(options: &'static [&'static str]) -> &'static str {
    options.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

/// Counts the words after the command name.
pub struct WordsHandler;

#[async_trait]
impl CommandHandler for WordsHandler {
    fn id(&self) -> CommandId {
        CommandId::Words
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        ctx.reply(format!("Word count: {}", args.len())).await
    }
}

/// `<name> is very <adjective>.`
pub struct WhoHandler;

#[async_trait]
impl CommandHandler for WhoHandler {
    fn id(&self) -> CommandId {
        CommandId::Who
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        let name = args.first().map(String::as_str).unwrap_or("Someone");
        let adjective = pick(ADJECTIVES);
        ctx.reply(format!("{} is very {}.", name, adjective)).await
    }
}

/// Replies with one answer drawn from a fixed list.
pub struct RandomAnswerHandler {
    id: CommandId,
    lead: &'static str,
    answers: &'static [&'static str],
}

impl RandomAnswerHandler {
    pub fn prediction() -> Self {
        Self {
            id: CommandId::Prediction,
            lead: "",
            answers: PREDICTIONS,
        }
    }

    pub fn eight_ball() -> Self {
        Self {
            id: CommandId::EightBall,
            lead: "",
            answers: EIGHT_BALL,
        }
    }

    pub fn fortune() -> Self {
        Self {
            id: CommandId::Fortune,
            lead: "🔮 Fortune: ",
            answers: FORTUNES,
        }
    }
}

#[async_trait]
impl CommandHandler for RandomAnswerHandler {
    fn id(&self) -> CommandId {
        self.id
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        let answer = pick(self.answers);
        ctx.reply(format!("{}{}", self.lead, answer)).await
    }
}
