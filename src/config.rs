use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Settings for the external text-completion service used by `/suggestions`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub completion: CompletionConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "doadev".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "doadev-users".into()),
            ttl_minutes: env_or("JWT_TTL_MINUTES", 60),
        };
        let completion = CompletionConfig {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            max_tokens: env_or("OPENAI_MAX_TOKENS", 100),
            timeout_secs: env_or("OPENAI_TIMEOUT_SECS", 30),
        };
        Ok(Self {
            database_url,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            jwt,
            completion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_missing_or_unparsable() {
        assert_eq!(env_or("DOADEV_TEST_SURELY_UNSET", 42u32), 42);
        std::env::set_var("DOADEV_TEST_NOT_A_NUMBER", "abc");
        assert_eq!(env_or("DOADEV_TEST_NOT_A_NUMBER", 7i64), 7);
        std::env::set_var("DOADEV_TEST_A_NUMBER", "15");
        assert_eq!(env_or("DOADEV_TEST_A_NUMBER", 7i64), 15);
    }
}
