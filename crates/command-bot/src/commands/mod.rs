//! Bot command handlers.

mod ascii;
mod fun;
mod help;
mod info;
mod kick;
mod lookup;
mod ping;
mod roll;
mod timer;

pub use ascii::{render_banner, AsciiHandler};
pub use fun::{RandomAnswerHandler, WhoHandler, WordsHandler};
pub use help::HelpHandler;
pub use info::{RandomPlayerHandler, ServerInfoHandler, UserInfoHandler};
pub use kick::KickHandler;
pub use lookup::{CryptoHandler, FactHandler, JokeHandler, QuoteHandler, TodayHandler};
pub use ping::{PingHandler, UptimeHandler};
pub use roll::{parse_range, RollHandler};
pub use timer::{CancelTimerHandler, TimerHandler};

use crate::registry::CommandHandler;
use lookup_client::LookupClient;
use std::sync::Arc;

/// Every shipped command handler.
pub fn default_handlers(lookup: Arc<LookupClient>) -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(HelpHandler),
        Arc::new(RollHandler),
        Arc::new(PingHandler),
        Arc::new(UptimeHandler),
        Arc::new(WordsHandler),
        Arc::new(WhoHandler),
        Arc::new(UserInfoHandler),
        Arc::new(ServerInfoHandler),
        Arc::new(RandomPlayerHandler),
        Arc::new(RandomAnswerHandler::prediction()),
        Arc::new(RandomAnswerHandler::eight_ball()),
        Arc::new(RandomAnswerHandler::fortune()),
        Arc::new(AsciiHandler),
        Arc::new(TimerHandler),
        Arc::new(CancelTimerHandler),
        Arc::new(JokeHandler::new(lookup.clone())),
        Arc::new(FactHandler::new(lookup.clone())),
        Arc::new(QuoteHandler::new(lookup.clone())),
        Arc::new(TodayHandler::new(lookup.clone())),
        Arc::new(CryptoHandler::new(lookup)),
        Arc::new(KickHandler),
    ]
}
