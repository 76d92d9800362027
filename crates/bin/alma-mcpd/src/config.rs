use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost";
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4040";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "alma-mcpd", version, about = "Alma schema MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    #[arg(
        long,
        env = "ALMA_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_HTTP_TIMEOUT_SECS
    )]
    http_timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "ALMA_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long = "mcp-http",
        env = "ALMA_MCP_HTTP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_http_serve: bool,

    #[arg(long, env = "ALMA_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct AlmaConfig {
    pub api_base_url: String,
    pub http_timeout: Option<Duration>,
    pub enable_stdio: bool,
    pub mcp_http_serve: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
    NoTransportEnabled,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NoTransportEnabled => {
                write!(f, "no transport enabled: set --stdio or --mcp-http")
            }
        }
    }
}

impl Error for ConfigError {}

impl AlmaConfig {
    /// Parses CLI arguments and environment variables into a validated
    /// configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` when a setting is invalid or no transport is
    /// enabled.
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for AlmaConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let api_base_url = args.api_base_url.trim().to_string();
        if api_base_url.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "API_BASE_URL",
                value: args.api_base_url,
            });
        }

        let http_timeout = if args.http_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.http_timeout_secs))
        };

        if !args.enable_stdio && !args.mcp_http_serve {
            return Err(ConfigError::NoTransportEnabled);
        }

        Ok(Self {
            api_base_url,
            http_timeout,
            enable_stdio: args.enable_stdio,
            mcp_http_serve: args.mcp_http_serve,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}
