use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use calc_contract::ContractConfig;
use calc_state::{FileWorldState, InMemoryWorldState, WorldState};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// World-state document; `None` keeps state in memory only.
    pub state_path: Option<PathBuf>,
    pub contract: ContractConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 7051)),
            state_path: None,
            contract: ContractConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    /// Open the configured world state.
    pub fn open_state(&self) -> ServerResult<Arc<dyn WorldState>> {
        let state: Arc<dyn WorldState> = match &self.state_path {
            Some(path) => Arc::new(FileWorldState::open(path)?),
            None => Arc::new(InMemoryWorldState::new()),
        };
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_contract::NonFinitePolicy;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:7051".parse::<SocketAddr>().unwrap());
        assert!(c.state_path.is_none());
        assert_eq!(c.contract, ContractConfig::default());
    }

    #[test]
    fn parse_full_toml() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"
            state_path = "/var/lib/calc/state.json"

            [contract]
            non_finite = "defer"
            max_id_len = 64
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.state_path, Some(PathBuf::from("/var/lib/calc/state.json")));
        assert_eq!(c.contract.non_finite, NonFinitePolicy::Defer);
        assert_eq!(c.contract.max_id_len, 64);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ServerConfig::from_toml_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calc.toml");
        std::fs::write(&path, "bind_addr = \"127.0.0.1:9000\"\n").unwrap();
        let c = ServerConfig::load(&path).unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
    }

    #[test]
    fn open_file_state() {
        let dir = tempfile::tempdir().unwrap();
        let c = ServerConfig {
            state_path: Some(dir.path().join("state.json")),
            ..Default::default()
        };
        let state = c.open_state().unwrap();
        state.put_state_without_kyc("k", b"v").unwrap();
        assert!(dir.path().join("state.json").exists());
    }
}
