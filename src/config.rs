use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub llm_endpoint_url: String,
    pub llm_api_token: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_email: String,
    pub smtp_password: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            llm_endpoint_url: std::env::var("LLM_ENDPOINT_URL")
                .map_err(|_| anyhow::anyhow!("LLM_ENDPOINT_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("LLM_ENDPOINT_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("LLM_ENDPOINT_URL must start with http:// or https://");
                    }
                    Ok(url)
                })?,
            llm_api_token: std::env::var("LLM_API_TOKEN")
                .map_err(|_| anyhow::anyhow!("LLM_API_TOKEN environment variable required"))
                .and_then(|token| {
                    if token.trim().is_empty() {
                        anyhow::bail!("LLM_API_TOKEN cannot be empty");
                    }
                    Ok(token)
                })?,
            smtp_host: std::env::var("SMTP_HOST")
                .map_err(|_| anyhow::anyhow!("SMTP_HOST environment variable required"))
                .and_then(|host| {
                    if host.trim().is_empty() {
                        anyhow::bail!("SMTP_HOST cannot be empty");
                    }
                    Ok(host)
                })?,
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SMTP_PORT must be a valid number between 1-65535"))?,
            smtp_email: std::env::var("SMTP_EMAIL")
                .map_err(|_| anyhow::anyhow!("SMTP_EMAIL environment variable required"))
                .and_then(|email| {
                    if email.trim().is_empty() {
                        anyhow::bail!("SMTP_EMAIL cannot be empty");
                    }
                    Ok(email)
                })?,
            smtp_password: std::env::var("SMTP_PASSWORD")
                .map_err(|_| anyhow::anyhow!("SMTP_PASSWORD environment variable required"))
                .and_then(|pass| {
                    if pass.trim().is_empty() {
                        anyhow::bail!("SMTP_PASSWORD cannot be empty");
                    }
                    Ok(pass)
                })?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            &config.database_url[..20.min(config.database_url.len())]
        );
        tracing::debug!("LLM endpoint: {}", config.llm_endpoint_url);
        tracing::debug!("SMTP relay: {}:{}", config.smtp_host, config.smtp_port);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
