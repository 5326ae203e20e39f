//! keyevent-replay: drives the key event pipeline from a script.
//!
//! Reads native key events from a TOML script, feeds them through a
//! [`KeyEventPlugin`] wired to an in-process loopback framework, and logs
//! each event's reply and verdict as they arrive.
//!
//! # Usage
//!
//! ```text
//! keyevent-replay [OPTIONS]
//!
//! Options:
//!   --script <PATH>         Replay script (built-in demo when omitted)
//!   --config <PATH>         Plugin config file [default: keyevent-plugin.toml]
//!   --channel <NAME>        Override the channel name
//!   --responder <KIND>      echo | handled | not-handled
//!   --fallback <KIND>       accept | ignore | fail
//!   --reply-delay-ms <MS>   Delay before each framework reply
//!   --log-level <FILTER>    tracing filter used when RUST_LOG is unset
//! ```
//!
//! CLI flags take precedence over the config file; `RUST_LOG` takes
//! precedence over both for the log filter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use keyevent_core::protocol::describe_value;
use keyevent_core::NativeKeyEvent;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keyevent_plugin::application::{
    KeyEventPlugin, KeyEventResponseCallback, ResponseError, TextInputHandler,
};
use keyevent_plugin::infrastructure::messenger::LoopbackMessenger;
use keyevent_plugin::infrastructure::storage::{
    FallbackKind, KeyScript, PluginConfig, ResponderKind,
};

/// Script used when `--script` is not given: `A` then a Caps Lock cycle.
const DEMO_SCRIPT: &str = r#"
[[event]]
type = "press"
keyval = 0x41
hardware_keycode = 4
string = "A"

[[event]]
type = "release"
keyval = 0x41
hardware_keycode = 4
string = "A"

[[event]]
type = "press"
keyval = 0xFFE5
hardware_keycode = 66

[[event]]
type = "release"
keyval = 0xFFE5
hardware_keycode = 66
"#;

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "keyevent-replay",
    about = "Replays native key events through the key event plugin",
    version
)]
struct Cli {
    /// TOML script of `[[event]]` tables to replay.
    #[arg(long, env = "KEYEVENT_SCRIPT")]
    script: Option<PathBuf>,

    /// Plugin config file.  A missing file means "all defaults".
    #[arg(long, default_value = "keyevent-plugin.toml", env = "KEYEVENT_CONFIG")]
    config: PathBuf,

    /// Channel the plugin sends on.
    #[arg(long, env = "KEYEVENT_CHANNEL")]
    channel: Option<String>,

    /// How the loopback framework answers.
    #[arg(long, value_enum, env = "KEYEVENT_RESPONDER")]
    responder: Option<ResponderKind>,

    /// How the text-input fallback answers declined events.
    #[arg(long, value_enum, env = "KEYEVENT_FALLBACK")]
    fallback: Option<FallbackKind>,

    /// Milliseconds before each framework reply.
    #[arg(long, env = "KEYEVENT_REPLY_DELAY_MS")]
    reply_delay_ms: Option<u64>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "KEYEVENT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Seconds to wait for outstanding verdicts before giving up.
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

impl Cli {
    /// Loads the config file and applies CLI overrides on top.
    fn into_config(self) -> anyhow::Result<(PluginConfig, Option<PathBuf>, Duration)> {
        let mut config = PluginConfig::load(&self.config)
            .with_context(|| format!("loading config from {}", self.config.display()))?;

        if let Some(channel) = self.channel {
            config.plugin.channel = channel;
        }
        if let Some(responder) = self.responder {
            config.loopback.responder = responder;
        }
        if let Some(fallback) = self.fallback {
            config.loopback.fallback = fallback;
        }
        if let Some(delay) = self.reply_delay_ms {
            config.loopback.reply_delay_ms = delay;
        }
        if let Some(level) = self.log_level {
            config.plugin.log_level = level;
        }

        Ok((config, self.script, Duration::from_secs(self.timeout_secs)))
    }
}

/// One completion, as reported by the plugin.
#[derive(Debug)]
struct Verdict {
    reply: String,
    handled: bool,
}

fn completion_sink(tx: mpsc::UnboundedSender<Verdict>) -> KeyEventResponseCallback {
    Arc::new(move |reply: Result<&Value, &ResponseError>, handled: bool| {
        let reply = match reply {
            Ok(value) => describe_value(value),
            Err(e) => format!("<{e}>"),
        };
        // The receiver outlives the plugin; a send error only happens at shutdown.
        let _ = tx.send(Verdict { reply, handled });
    })
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (config, script_path, timeout) = Cli::parse().into_config()?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.plugin.log_level)),
        )
        .init();

    let script = match &script_path {
        Some(path) => KeyScript::load(path)
            .with_context(|| format!("loading script from {}", path.display()))?,
        None => KeyScript::parse(DEMO_SCRIPT).context("parsing built-in demo script")?,
    };
    let events: Vec<NativeKeyEvent> = script.native_events();

    info!(
        channel = %config.plugin.channel,
        responder = ?config.loopback.responder,
        fallback = ?config.loopback.fallback,
        events = events.len(),
        "keyevent-replay starting"
    );

    // ── Wiring ────────────────────────────────────────────────────────────────
    let messenger = LoopbackMessenger::new(tokio::runtime::Handle::current())
        .with_reply_delay(Duration::from_millis(config.loopback.reply_delay_ms));
    messenger.set_responder(
        config.plugin.channel.clone(),
        config.loopback.responder.responder(),
    );
    let text_input = Arc::new(config.loopback.fallback.text_input());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut plugin = KeyEventPlugin::new(
        Arc::new(messenger),
        Arc::clone(&text_input) as Arc<dyn TextInputHandler>,
        completion_sink(tx),
        config.plugin.channel.clone(),
    )
    .with_encoder(config.plugin.encoder());

    // ── Replay ────────────────────────────────────────────────────────────────
    for event in &events {
        let consumed = plugin.send_key_event(event);
        info!(keyval = %format!("{:#x}", event.keyval), consumed, "sent");
    }

    let mut handled_count = 0usize;
    for index in 0..events.len() {
        let verdict = match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Some(verdict)) => verdict,
            Ok(None) => bail!("completion channel closed after {index} verdicts"),
            Err(_) => bail!(
                "timed out waiting for verdict {} of {} ({} still pending)",
                index + 1,
                events.len(),
                plugin.pending_events()
            ),
        };
        if verdict.handled {
            handled_count += 1;
        }
        info!(index, handled = verdict.handled, reply = %verdict.reply, "verdict");
    }

    if text_input.call_count() > 0 {
        info!(calls = text_input.call_count(), "text input fallback consulted");
    }
    info!(
        sent = plugin.events_sent(),
        handled = handled_count,
        "keyevent-replay finished"
    );
    Ok(())
}
