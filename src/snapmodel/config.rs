use serde::{Deserialize, Serialize};

/// Per-proxy settings. The embedding application builds one in code or
/// deserializes it from its own configuration; nothing here touches files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
    /// Emit trace-level log events for attribute reads and resolution misses
    #[serde(default)]
    pub trace_access: bool,
}

impl ModelConfig {
    pub fn with_trace_access(mut self, enabled: bool) -> Self {
        self.trace_access = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct HostSettings {
        #[serde(default)]
        model: ModelConfig,
    }

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert!(!config.trace_access);
    }

    #[test]
    fn test_builder_sets_trace_access() {
        let config = ModelConfig::default().with_trace_access(true);
        assert!(config.trace_access);
        assert!(!config.with_trace_access(false).trace_access);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let parsed: ModelConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, ModelConfig::default());
    }

    #[test]
    fn test_nested_in_host_settings() {
        let parsed: HostSettings =
            serde_json::from_str(r#"{"model": {"trace_access": true}}"#).unwrap();
        assert!(parsed.model.trace_access);

        let absent: HostSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.model, ModelConfig::default());
    }

    #[test]
    fn test_serializes_field_by_name() {
        let json = serde_json::to_value(ModelConfig::default().with_trace_access(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "trace_access": true }));
    }
}
