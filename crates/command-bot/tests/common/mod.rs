//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use command_bot::commands::default_handlers;
use command_bot::error::CommandError;
use command_bot::gate::CommandGate;
use command_bot::moderation::ModerationFilter;
use command_bot::platform::{
    GroupInfo, InboundMessage, MessageRef, Platform, PlatformError, Reply,
};
use command_bot::registry::{CommandContext, CommandHandler, CommandId, CommandRegistry};
use command_bot::scheduler::ReminderScheduler;
use command_bot::{DispatchOutcome, Dispatcher, DispatcherConfig};
use cooldown_store::CooldownTracker;
use lookup_client::{Endpoints, LookupClient};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The bot's own identity in every harness.
pub const BOT_ID: &str = "+15550000000";

/// Platform fake that records every outbound operation.
#[derive(Default)]
pub struct RecordingPlatform {
    sent: Mutex<Vec<(String, Reply)>>,
    deleted: Mutex<Vec<MessageRef>>,
    removed: Mutex<Vec<(String, String)>>,
    groups: Mutex<HashMap<String, GroupInfo>>,
    fail_deletes: AtomicBool,
}

impl RecordingPlatform {
    /// Make every subsequent delete fail.
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    /// Make `group` known with the given members.
    pub fn add_group(&self, group: &str, name: &str, members: &[&str]) {
        self.groups.lock().unwrap().insert(
            group.to_string(),
            GroupInfo {
                name: name.to_string(),
                description: None,
                members: members.iter().map(|m| m.to_string()).collect(),
                admins: Vec::new(),
            },
        );
    }

    pub fn sent(&self) -> Vec<(String, Reply)> {
        self.sent.lock().unwrap().clone()
    }

    /// Rendered text of every reply, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sent().iter().map(|(_, reply)| reply.render()).collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    pub fn deleted(&self) -> Vec<MessageRef> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<(String, String)> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn send(&self, conversation: &str, reply: Reply) -> Result<(), PlatformError> {
        self.sent
            .lock()
            .unwrap()
            .push((conversation.to_string(), reply));
        Ok(())
    }

    async fn delete(&self, message: &MessageRef) -> Result<(), PlatformError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(PlatformError::Other("delete rejected".into()));
        }
        self.deleted.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn remove_member(&self, group: &str, member: &str) -> Result<(), PlatformError> {
        self.removed
            .lock()
            .unwrap()
            .push((group.to_string(), member.to_string()));
        Ok(())
    }

    async fn group_info(&self, group: &str) -> Result<GroupInfo, PlatformError> {
        self.groups
            .lock()
            .unwrap()
            .get(group)
            .cloned()
            .ok_or_else(|| PlatformError::Other(format!("unknown group {}", group)))
    }
}

/// Always returns an error.
pub struct FailingHandler(pub CommandId);

#[async_trait]
impl CommandHandler for FailingHandler {
    fn id(&self) -> CommandId {
        self.0
    }

    async fn execute(&self, _ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        Err(CommandError::Failed("upstream exploded".into()))
    }
}

/// Always panics.
pub struct PanickingHandler(pub CommandId);

#[async_trait]
impl CommandHandler for PanickingHandler {
    fn id(&self) -> CommandId {
        self.0
    }

    async fn execute(&self, _ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        panic!("handler bug");
    }
}

/// Sleeps before replying, to hold a cooldown reservation open.
pub struct SlowHandler(pub CommandId, pub Duration);

#[async_trait]
impl CommandHandler for SlowHandler {
    fn id(&self) -> CommandId {
        self.0
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> Result<(), CommandError> {
        tokio::time::sleep(self.1).await;
        ctx.reply("done").await
    }
}

/// A dispatcher wired to a [`RecordingPlatform`].
pub struct Harness {
    pub platform: Arc<RecordingPlatform>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    /// Dispatch a direct message from `author`.
    pub async fn send(&self, author: &str, text: &str) -> DispatchOutcome {
        self.dispatcher
            .on_message(InboundMessage::new(author, text))
            .await
    }
}

pub struct HarnessBuilder {
    prefix: String,
    commands: HashMap<String, bool>,
    banned_terms: Vec<String>,
    window: Duration,
    endpoints: Endpoints,
    handlers: Vec<Arc<dyn CommandHandler>>,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self {
            prefix: "!".into(),
            commands: HashMap::new(),
            banned_terms: Vec::new(),
            window: Duration::from_secs(5),
            endpoints: Endpoints::default(),
            handlers: Vec::new(),
        }
    }
}

impl HarnessBuilder {
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn disable(mut self, command: &str) -> Self {
        self.commands.insert(command.into(), false);
        self
    }

    pub fn banned(mut self, terms: &[&str]) -> Self {
        self.banned_terms = terms.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn lookup(mut self, base_url: &str) -> Self {
        self.endpoints = Endpoints {
            joke: base_url.into(),
            fact: base_url.into(),
            quote: base_url.into(),
            history: base_url.into(),
            crypto: base_url.into(),
        };
        self
    }

    /// Register `handler` over the built-in one for the same command.
    pub fn handler(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    pub fn build(self) -> Harness {
        let platform = Arc::new(RecordingPlatform::default());
        let lookup = Arc::new(LookupClient::new(self.endpoints, Duration::from_secs(5)).unwrap());

        let mut registry = CommandRegistry::new();
        for handler in default_handlers(lookup).into_iter().chain(self.handlers) {
            registry.register(handler);
        }

        let dispatcher = Dispatcher::new(
            DispatcherConfig {
                prefix: self.prefix,
                bot_id: BOT_ID.into(),
            },
            platform.clone(),
            registry,
            CommandGate::new(&self.commands).unwrap(),
            ModerationFilter::new(&self.banned_terms).unwrap(),
            CooldownTracker::new(self.window),
            ReminderScheduler::new(platform.clone()),
        );

        Harness {
            platform,
            dispatcher,
        }
    }
}
