use crate::configuration::Configuration;
use clap::Parser;
use std::env;
use tracing::warn;

/// Runtime configuration from command line arguments, falling back to
/// environment variables (a `.env` file is honored via dotenvy).
#[derive(Parser, Clone, Debug)]
#[command(name = "portfolio_backend", about = "Backend for the personal portfolio website")]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on.
    #[arg(long)]
    port: Option<String>,
    /// PostgreSQL connection URL. Without it the schedule is kept in memory.
    #[arg(long)]
    database_url: Option<String>,
    /// Password expected in the x-admin-password header of admin requests.
    #[arg(long)]
    admin_password: Option<String>,
    /// HTTP endpoint of the mail provider used for booking confirmations.
    #[arg(long)]
    mail_endpoint: Option<String>,
    /// Bearer token for the mail provider.
    #[arg(long)]
    mail_token: Option<String>,
    /// From-address of outgoing confirmation mails.
    #[arg(long)]
    sender_address: Option<String>,
    /// Address that receives the admin copy of each confirmation.
    #[arg(long)]
    admin_address: Option<String>,
    /// Display name used in confirmation mails.
    #[arg(long)]
    site_owner: Option<String>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    fn from_env(argument: &Option<String>, key: &str) -> Option<String> {
        argument.clone().or_else(|| env::var(key).ok())
    }

    fn with_default(argument: &Option<String>, key: &str, default: &str) -> String {
        Self::from_env(argument, key).unwrap_or_else(|| {
            warn!("{key} not set, using default: {default}");
            default.to_string()
        })
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> String {
        Self::with_default(&self.port, "PORT", "3000")
    }

    fn admin_password(&self) -> String {
        Self::with_default(&self.admin_password, "ADMIN_PASSWORD", "123")
    }

    fn database_url(&self) -> Option<String> {
        Self::from_env(&self.database_url, "DATABASE_URL")
    }

    fn mail_endpoint(&self) -> Option<String> {
        Self::from_env(&self.mail_endpoint, "MAIL_ENDPOINT")
    }

    fn mail_token(&self) -> Option<String> {
        Self::from_env(&self.mail_token, "MAIL_TOKEN")
    }

    fn sender_address(&self) -> String {
        Self::with_default(&self.sender_address, "SENDER_ADDRESS", "noreply@example.com")
    }

    fn admin_address(&self) -> String {
        Self::with_default(&self.admin_address, "ADMIN_ADDRESS", "admin@example.com")
    }

    fn site_owner(&self) -> String {
        Self::with_default(&self.site_owner, "SITE_OWNER", "the site owner")
    }
}
