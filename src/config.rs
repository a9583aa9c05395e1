use std::path::Path;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::dispatch::{ClearPolicy, DispatchPolicy, OverlapPolicy};
use crate::reply::{DEFAULT_LATENCY, DEFAULT_REPLY_TEXT};

/// Prefix for environment overrides, e.g. `DRHIRO_SERVER__PORT=8000`.
pub const ENV_PREFIX: &str = "DRHIRO";

/// Config file picked up from the working directory when none is given.
pub const CWD_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Simulated reply latency in milliseconds
    #[arg(long)]
    pub reply_latency_ms: Option<u64>,

    /// Behavior when sending while a reply is pending (concurrent, queue)
    #[arg(long)]
    pub overlap: Option<String>,

    /// Behavior of "Clear Chat" towards pending replies (cancel-pending, keep-pending)
    #[arg(long)]
    pub on_clear: Option<String>,

    /// Log output format (compact, json)
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory served under `/static`.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub reply_latency_ms: u64,
    pub reply_text: String,
    pub overlap: OverlapPolicy,
    pub on_clear: ClearPolicy,
    pub session_idle_timeout_secs: u64,
    /// Upper bound for one long-poll request.
    pub poll_timeout_secs: u64,
}

impl ChatConfig {
    #[must_use]
    pub fn reply_latency(&self) -> Duration {
        Duration::from_millis(self.reply_latency_ms)
    }

    #[must_use]
    pub fn dispatch_policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            overlap: self.overlap,
            on_clear: self.on_clear,
        }
    }

    #[must_use]
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }

    /// How often an open page reports that it is still mounted.
    ///
    /// A third of the idle timeout, at most a minute, so a live page is never
    /// swept.
    #[must_use]
    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_secs((self.session_idle_timeout_secs / 3).clamp(1, 60))
    }

    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Script URL for HTMX.
    pub htmx_src: String,
    /// Stylesheet URL.
    pub stylesheet: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Build the configuration.
    ///
    /// Priority: CLI flag > `DRHIRO_` environment > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let latency_ms = u64::try_from(DEFAULT_LATENCY.as_millis()).unwrap_or(u64::MAX);

        // 1. Defaults
        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.static_dir", "static")?
            .set_default("chat.reply_latency_ms", latency_ms)?
            .set_default("chat.reply_text", DEFAULT_REPLY_TEXT)?
            .set_default("chat.overlap", "concurrent")?
            .set_default("chat.on_clear", "cancel-pending")?
            .set_default("chat.session_idle_timeout_secs", 30 * 60)?
            .set_default("chat.poll_timeout_secs", 25)?
            .set_default("ui.htmx_src", "/static/vendor/htmx-2.0.8.min.js")?
            .set_default("ui.stylesheet", "/static/app.css")?
            .set_default("log.format", "compact")?;

        // 2. Config file: explicit path must exist, ./config.yaml is optional
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path).required(true));
        } else if Path::new(CWD_CONFIG_FILE).exists() {
            builder = builder.add_source(File::with_name(CWD_CONFIG_FILE).required(false));
        }

        // 3. Environment variables (prefixed with DRHIRO_), e.g. DRHIRO_CHAT__OVERLAP=queue
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI overrides (clap also folds in PORT / HOST / LOG_FORMAT)
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(latency) = cli.reply_latency_ms {
            builder = builder.set_override("chat.reply_latency_ms", latency)?;
        }
        if let Some(overlap) = cli.overlap {
            builder = builder.set_override("chat.overlap", overlap)?;
        }
        if let Some(on_clear) = cli.on_clear {
            builder = builder.set_override("chat.on_clear", on_clear)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("log.format", format)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
