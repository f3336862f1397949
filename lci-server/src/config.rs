//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which transport delivers customer emails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailerKind {
    /// Amazon SES
    Ses,
    /// Render and log only (development)
    Log,
}

impl MailerKind {
    fn parse(value: &str) -> Result<Self, BoxError> {
        match value {
            "ses" => Ok(Self::Ses),
            "log" => Ok(Self::Log),
            other => Err(format!("MAILER must be 'ses' or 'log', got '{other}'").into()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (absent → in-memory store, development only)
    pub database_url: Option<String>,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for admin identity tokens
    pub jwt_secret: String,
    /// Identity token lifetime
    pub jwt_expiry_hours: i64,
    /// Email transport
    pub mailer: MailerKind,
    /// SES sender address
    pub ses_from_email: String,
    /// Public order tracking page linked from emails
    pub track_order_url: String,
    /// Rate-limit on the client address reported by a fronting proxy
    pub trust_forwarded_for: bool,
}

impl Config {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    fn parse_flag(value: &str) -> bool {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        )
    }

    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if database_url.is_none() && environment != "development" {
            return Err(format!("DATABASE_URL must be set in {environment} environment").into());
        }

        let default_mailer = if environment == "development" {
            "log"
        } else {
            "ses"
        };
        let mailer =
            MailerKind::parse(&std::env::var("MAILER").unwrap_or_else(|_| default_mailer.into()))?;

        Ok(Self {
            database_url,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiry_hours: std::env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h: &i64| *h > 0)
                .unwrap_or(24),
            environment,
            mailer,
            ses_from_email: std::env::var("SES_FROM_EMAIL")
                .unwrap_or_else(|_| "Lecrafto International <orders@lecrafto.com>".into()),
            track_order_url: std::env::var("TRACK_ORDER_URL")
                .unwrap_or_else(|_| "https://lecrafto.lovable.app/track-order".into()),
            trust_forwarded_for: std::env::var("TRUST_FORWARDED_FOR")
                .map(|v| Self::parse_flag(&v))
                .unwrap_or(false),
        })
    }
}
