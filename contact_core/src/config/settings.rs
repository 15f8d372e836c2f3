use config::{Config, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment names used by the deployed site before the `APP_` scheme.
const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("EMAIL_USER", "mail.username"),
    ("EMAIL_PASS", "mail.password"),
    ("RECIPIENT_EMAIL", "mail.recipient"),
    ("EMAIL_HOST", "mail.host"),
    ("EMAIL_PORT", "mail.port"),
    ("EMAIL_SECURE", "mail.secure"),
    ("FRONTEND_URL", "cors.allowed_origin"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS when true, STARTTLS otherwise.
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub recipient: Option<String>,
    pub from_name: String,
    pub send_timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 465,
            secure: true,
            username: None,
            password: None,
            recipient: None,
            from_name: "Portfolio Contact Form".to_string(),
            send_timeout_seconds: 10,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl MailConfig {
    pub fn is_configured(&self) -> bool {
        non_blank(&self.username).is_some()
            && non_blank(&self.password).is_some()
            && !self.host.trim().is_empty()
    }

    /// Where notifications go; the sending account itself when no recipient is set.
    pub fn recipient_address(&self) -> Option<&str> {
        non_blank(&self.recipient).or_else(|| non_blank(&self.username))
    }

    pub fn sender_address(&self) -> Option<&str> {
        non_blank(&self.username)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new("config.toml");
        Self::load_from(path.exists().then_some(path))
    }

    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, std::env::vars().collect())
    }

    /// Like [`AppConfig::load_from`], reading variables from `env` instead of
    /// the process environment.
    pub fn load_with_env(
        file: Option<&Path>,
        env: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if let Some(file) = file {
            builder = builder.add_source(File::from(file));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        for (var, key) in LEGACY_ENV_OVERRIDES {
            let value = env.get(*var).filter(|v| !v.trim().is_empty()).cloned();
            builder = builder.set_override_option(*key, value)?;
        }

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.mail.send_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Mail send timeout must be greater than 0".to_string(),
            ));
        }

        if self.mail.port == 0 {
            return Err(ConfigError::Message("Mail port cannot be 0".to_string()));
        }

        // Missing credentials are reported per request, not at startup.
        if !self.mail.is_configured() {
            tracing::warn!("Mail credentials are not configured - contact submissions will fail");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
