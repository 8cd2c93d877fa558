use anyhow::anyhow;
use dotenvy::dotenv;
use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_RETURN_URL: &str = "http://0.0.0.0:8000/paypal/success";
pub const DEFAULT_CANCEL_URL: &str = "http://0.0.0.0:8000/paypal/cancel";
pub const DEFAULT_REDIRECT_URI: &str = "http://0.0.0.0:8000/callback";

#[derive(Clone, Debug)]
pub struct Config {
    pub server: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub paypal: PayPalConfig,
}

/// Which PayPal deployment the gateway talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayPalEnvironment {
    Sandbox,
    Live,
}

impl PayPalEnvironment {
    pub fn api_base_url(&self) -> &'static str {
        match self {
            PayPalEnvironment::Sandbox => "https://api-m.sandbox.paypal.com",
            PayPalEnvironment::Live => "https://api-m.paypal.com",
        }
    }

    pub fn authorize_url(&self) -> &'static str {
        match self {
            PayPalEnvironment::Sandbox => "https://www.sandbox.paypal.com/signin/authorize",
            PayPalEnvironment::Live => "https://www.paypal.com/signin/authorize",
        }
    }
}

impl std::str::FromStr for PayPalEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sandbox" => Ok(PayPalEnvironment::Sandbox),
            "live" => Ok(PayPalEnvironment::Live),
            _ => Err(format!("Invalid PayPal environment: {}", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PayPalConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub environment: PayPalEnvironment,
    /// REST API root, e.g. `https://api-m.sandbox.paypal.com`.
    pub api_base_url: String,
    /// Login page the OAuth flow sends the payer to.
    pub authorize_url: String,
    pub return_url: String,
    pub cancel_url: String,
    pub redirect_uri: String,
    /// Ordered OAuth scopes requested at login.
    pub scopes: Vec<String>,
    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let server = core_config::Config::load()?;

        let environment: PayPalEnvironment = get_env("PAYPAL_ENVIRONMENT", Some("sandbox"))?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow!(e)))?;

        let paypal = PayPalConfig {
            client_id: get_env("PAYPAL_CLIENT_ID", None)?,
            client_secret: Secret::new(get_env("PAYPAL_CLIENT_SECRET", None)?),
            api_base_url: get_env("PAYPAL_API_BASE_URL", Some(environment.api_base_url()))?,
            authorize_url: get_env("PAYPAL_AUTHORIZE_URL", Some(environment.authorize_url()))?,
            environment,
            return_url: get_env("PAYPAL_RETURN_URL", Some(DEFAULT_RETURN_URL))?,
            cancel_url: get_env("PAYPAL_CANCEL_URL", Some(DEFAULT_CANCEL_URL))?,
            redirect_uri: get_env("PAYPAL_REDIRECT_URI", Some(DEFAULT_REDIRECT_URI))?,
            scopes: parse_scopes(&get_env("PAYPAL_SCOPES", Some("openid"))?),
            request_timeout_seconds: get_env("PAYPAL_REQUEST_TIMEOUT_SECONDS", Some("30"))?
                .parse()
                .map_err(|e: std::num::ParseIntError| {
                    AppError::ConfigError(anyhow!("PAYPAL_REQUEST_TIMEOUT_SECONDS: {}", e))
                })?,
        };

        let config = Self {
            server,
            service_name: get_env("SERVICE_NAME", Some("paypal-service"))?,
            log_level: get_env("LOG_LEVEL", Some("info,paypal_service=debug"))?,
            otlp_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .ok()
                .filter(|v| !v.is_empty()),
            paypal,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.paypal.client_id.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow!(
                "PAYPAL_CLIENT_ID must not be empty"
            )));
        }

        if self.paypal.client_secret.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(anyhow!(
                "PAYPAL_CLIENT_SECRET must not be empty"
            )));
        }

        if self.paypal.request_timeout_seconds == 0 {
            return Err(AppError::ConfigError(anyhow!(
                "PAYPAL_REQUEST_TIMEOUT_SECONDS must be positive"
            )));
        }

        if self.paypal.scopes.is_empty() {
            return Err(AppError::ConfigError(anyhow!(
                "PAYPAL_SCOPES must name at least one scope"
            )));
        }

        Ok(())
    }
}

/// Split a comma separated scope list, keeping order and dropping blanks.
pub fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow!("{} is required but not set", key))),
        },
    }
}
