//! Server configuration.
//!
//! Loaded from an optional YAML file (`spendboard.yaml`, or the path in
//! `SPENDBOARD_CONFIG`), then overridden by environment variables. Missing
//! file means defaults; a config that fails validation stops startup.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::backend::domain::validation::{self, MessageCatalog};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Data directory for the CSV store; platform default when absent
    pub data_dir: Option<PathBuf>,
    /// Directory server-side exports land in; Documents folder when absent
    pub export_dir: Option<PathBuf>,
    /// Origin the dashboard frontend is served from
    pub cors_origin: String,
    /// Shown on the dashboard's error screens; must look like an e-mail
    pub contact_email: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            data_dir: None,
            export_dir: None,
            cors_origin: "http://localhost:8080".to_string(),
            contact_email: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var("SPENDBOARD_CONFIG")
            .unwrap_or_else(|_| "spendboard.yaml".to_string());

        let mut config = if Path::new(&path).exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        } else {
            Self::default()
        };

        if let Ok(addr) = std::env::var("SPENDBOARD_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(dir) = std::env::var("SPENDBOARD_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(dir) = std::env::var("SPENDBOARD_EXPORT_DIR") {
            config.export_dir = Some(PathBuf::from(dir));
        }
        if let Ok(origin) = std::env::var("SPENDBOARD_CORS_ORIGIN") {
            config.cors_origin = origin;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configs the server could not honor.
    pub fn validate(&self) -> Result<()> {
        if let Some(email) = &self.contact_email {
            let mut issues = Vec::new();
            validation::check_email(&mut issues, "contact_email", email);
            if let Some(issue) = issues.first() {
                bail!(
                    "Invalid config: contact_email: {}",
                    MessageCatalog::default().format(issue)
                );
            }
        }
        Ok(())
    }

    /// Where server-side exports land when no custom path is given.
    pub fn export_directory(&self) -> PathBuf {
        if let Some(dir) = &self.export_dir {
            return dir.clone();
        }
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("Spendboard Exports"))
            .unwrap_or_else(|| PathBuf::from("exports"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.cors_origin, "http://localhost:8080");
        assert!(config.data_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let raw = "bind_addr: \"127.0.0.1:4000\"\ncontact_email: \"admin@example.com\"\n";
        let config: ServerConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:4000");
        assert_eq!(config.contact_email.as_deref(), Some("admin@example.com"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let config = ServerConfig {
            contact_email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid email address"));
    }

    #[test]
    fn test_explicit_export_dir_wins() {
        let config = ServerConfig {
            export_dir: Some(PathBuf::from("/tmp/exports")),
            ..Default::default()
        };
        assert_eq!(config.export_directory(), PathBuf::from("/tmp/exports"));
    }
}
