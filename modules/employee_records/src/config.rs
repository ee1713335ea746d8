//! Configuration for the employee records module

use serde::Deserialize;

/// Employee records configuration
///
/// `app_name` and `port` are passthrough values for the hosting
/// application; they have no effect on the data model.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Application entry point name
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Run port for the hosting application
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            app_name: default_app_name(),
            port: default_port(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_app_name() -> String {
    "employee-records".to_string()
}

fn default_port() -> u16 {
    5555
}
