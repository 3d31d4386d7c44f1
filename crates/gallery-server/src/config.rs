use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, Result};
use gallery_data::SeedConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub seed: SeedConfig,
    pub graphiql: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup so tests don't have to touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("GALLERY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "GALLERY_PORT", 4000)?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        let defaults = SeedConfig::default();
        let seed = SeedConfig {
            users: parse_or(&lookup, "GALLERY_USERS", defaults.users)?,
            albums: parse_or(&lookup, "GALLERY_ALBUMS", defaults.albums)?,
            photos: parse_or(&lookup, "GALLERY_PHOTOS", defaults.photos)?,
            seed: lookup("GALLERY_SEED")
                .map(|v| v.parse::<u64>().with_context(|| format!("GALLERY_SEED: invalid value {v:?}")))
                .transpose()?,
        };

        let graphiql = parse_or(&lookup, "GALLERY_GRAPHIQL", false)?;

        Ok(Self {
            addr,
            seed,
            graphiql,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(v) => v
            .parse()
            .with_context(|| format!("{key}: invalid value {v:?}")),
        None => Ok(default),
    }
}
