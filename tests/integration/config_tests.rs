//! Configuration integration tests

#[cfg(test)]
mod tests {
    use route_gate::config::{Config, RouteConfig};
    use route_gate::gate::GateSettings;
    use route_gate::GateError;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_example_config_loads() {
        let config = Config::from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/gate.yaml.example"
        ))
        .await
        .unwrap();

        assert_eq!(config, Config::default());
        let table = config.route_table().unwrap();
        assert!(table.has_wildcard());
    }

    #[tokio::test]
    async fn test_invalid_fallback_rejected_on_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gate:\n  fallback: signin").unwrap();

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, GateError::Validation(ref msg) if msg.contains("Gate config error")));
    }

    #[test]
    fn test_settings_from_config() {
        let yaml = "gate:\n  fallback: /signin\n  authority_timeout_ms: 1200\n";
        let config = Config::from_yaml(yaml).unwrap();

        let settings = GateSettings::from(config.gate());
        assert_eq!(settings.fallback, "/signin");
        assert_eq!(settings.authority_timeout, Duration::from_millis(1200));
    }

    #[test]
    fn test_nested_wildcard_rejected() {
        let mut config = Config::default();
        config.routes.push(
            RouteConfig::new("admin").with_child(RouteConfig::redirect("**", "/")),
        );
        assert!(config.validate().is_err());
    }
}
