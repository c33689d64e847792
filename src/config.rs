//! Behaviour switches for contract wrappers.
use crate::validation::ContractError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Check the value returned by the authored method body against the
    /// declared return contract.
    pub enforce_return_contract: bool,
    /// Log a rendering of every wrapper at `debug` level before it is installed.
    pub emit_wrapper_diagnostics: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self { enforce_return_contract: true, emit_wrapper_diagnostics: true }
    }
}

impl ContractConfig {
    /// Parses a JSON object; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ContractError> {
        serde_json::from_str(json).map_err(|e| ContractError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ContractConfig::default();
        assert!(cfg.enforce_return_contract);
        assert!(cfg.emit_wrapper_diagnostics);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = ContractConfig::from_json_str(r#"{ "enforce_return_contract": false }"#).unwrap();
        assert!(!cfg.enforce_return_contract);
        assert!(cfg.emit_wrapper_diagnostics);
    }

    #[test]
    fn test_bad_json_is_a_config_error() {
        let err = ContractConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ContractError::Config(_)));
    }
}
