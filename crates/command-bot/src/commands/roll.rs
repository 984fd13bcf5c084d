//! Dice roll command.

use crate::error::CommandError;
use crate::platform::Embed;
use crate::registry::{CommandContext, CommandHandler, CommandId};
use async_trait::async_trait;
use rand::Rng;

const DEFAULT_MIN: i64 = 1;
const DEFAULT_MAX: i64 = 100;

/// Parse a `min-max` argument.
///
/// A bound that is missing, unparsable or zero falls back to its default;
/// reversed bounds are swapped.
pub fn parse_range(arg: Option<&str>) -> (i64, i64) {
    let (min, max) = match arg {
        Some(arg) => match arg.split_once('-') {
            Some((min, max)) => (parse_bound(min), parse_bound(max)),
            None => (parse_bound(arg), None),
        },
        None => (None, None),
    };

    let min = min.unwrap_or(DEFAULT_MIN);
    let max = max.unwrap_or(DEFAULT_MAX);
    if min > max {
        (max, min)
    } else {
        (min, max)
    }
}

/// Leading integer of `raw`, ignoring anything after it (`7x` is 7).
fn parse_bound(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '+' || c == '-'))))
        .map_or(raw.len(), |(i, _)| i);
    raw[..end].parse::<i64>().ok().filter(|n| *n != 0)
}

pub struct RollHandler;

#[async_trait]
impl CommandHandler for RollHandler {
    fn id(&self) -> CommandId {
        CommandId::Roll
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<(), CommandError> {
        let (min, max) = parse_range(args.first().map(String::as_str));
        let result = rand::thread_rng().gen_range(min..=max);

        let embed = Embed::new("🎲 Dice Roll", 0x00FF00)
            .description(format!("You rolled: **{}**", result));
        ctx.reply(embed).await
    }
}
