use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: String,
    /// Base URL of the external jobs backend, e.g. `http://localhost:5000`
    #[serde(default = "default_jobs_api_url")]
    pub jobs_api_url: String,
}

fn default_service_name() -> String {
    "jobtrack".into()
}

fn default_listen_port() -> String {
    "3000".into()
}

fn default_jobs_api_url() -> String {
    "http://localhost:5000".into()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        conf.try_deserialize()
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
