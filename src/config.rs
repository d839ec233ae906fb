use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;

/// Server configuration: the listen address and the virtual host table.
///
/// The virtual host table maps a Host header value to the document root
/// served for that host. It is established once at startup and shared
/// read-only with every connection afterwards.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// TCP address to listen on, e.g. "127.0.0.1:8080".
    pub listen_addr: String,
    /// Host name -> document root path.
    pub virtual_hosts: HashMap<String, String>,
}

impl Config {
    /// Loads the configuration from the YAML file named by the
    /// `STATICD_CONFIG` environment variable, falling back to
    /// `config.yaml` in the working directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("STATICD_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {path}"))?;
        Self::parse(&raw)
    }

    /// Parses a configuration from YAML text.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(raw).context("failed to parse config")
    }

    /// Checks that every document root exists and is a directory.
    ///
    /// A violation is a fatal startup error; the server must not accept
    /// connections with a broken virtual host table.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (host, doc_root) in &self.virtual_hosts {
            let meta = std::fs::metadata(Path::new(doc_root)).with_context(|| {
                format!("document root {doc_root} for host {host} does not exist")
            })?;
            if !meta.is_dir() {
                anyhow::bail!("document root {doc_root} for host {host} is not a directory");
            }
        }
        Ok(())
    }
}
