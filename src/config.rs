use anyhow::Context;
use dotenv::dotenv;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub database_url: String,
    pub secret: String,
    pub front_base_url: String,
    pub upload_dir: String,
    pub use_secure_cookies: bool,
}

impl Config {
    pub fn new() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        let envs = envy::from_env::<Self>().context("invalid environment variables")?;

        return Ok(envs);
    }
}
