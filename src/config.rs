use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When absent the API runs on the in-memory store.
    pub database_url: Option<String>,
    pub token_secret: String,
    pub host: String,
    pub port: u16,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|s| !s.is_empty());

        Ok(Self {
            database_url: get("DATABASE_URL"),
            token_secret: get("TOKEN_SECRET")
                .ok_or_else(|| anyhow::anyhow!("Missing required env var: TOKEN_SECRET"))?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: get("PORT").unwrap_or_else(|| "8080".into()).parse()?,
            bcrypt_cost: get("BCRYPT_COST").unwrap_or_else(|| "10".into()).parse()?,
        })
    }
}
