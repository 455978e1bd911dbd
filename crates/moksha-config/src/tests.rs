#[cfg(test)]
mod tests {
    use super::super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_deployment() {
        let config = Config::default();
        assert_eq!(config.server.port, 5173);
        assert!(config.server.enable_logs);
        assert!(!config.server.is_production());
        assert_eq!(config.server.dist_dir, PathBuf::from("./dist"));
        assert_eq!(config.proxy.timeout_secs, 30);
    }

    #[test]
    fn test_default_mount_lifetimes() {
        let mounts = Config::default().mounts;
        let ages: Vec<(&str, Option<u64>)> =
            mounts.iter().map(|m| (m.prefix.as_str(), m.max_age)).collect();
        assert_eq!(ages, vec![
            ("/assets", Some(86_400)),
            ("/images", Some(2_592_000)),
            ("/logos",  Some(2_592_000)),
            ("/moksha", Some(2_592_000)),
        ]);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(env(&[
            ("PROXY_PORT", "8080"),
            ("PROXY_ENV", "production"),
            ("PROXY_REDIRECT_ORIGIN", "http://127.0.0.1:8000"),
            ("DIST_DIR", "/srv/moksha"),
        ])).unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.server.is_production());
        assert_eq!(config.proxy.origin.as_deref(), Some("http://127.0.0.1:8000"));
        assert_eq!(config.server.dist_dir, PathBuf::from("/srv/moksha"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enable_logs_only_disabled_by_literal_false() {
        for (value, expected) in [("false", false), ("true", true), ("0", true), ("FALSE", true)] {
            let mut config = Config::default();
            config.apply_env(env(&[("ENABLE_LOGS", value)])).unwrap();
            assert_eq!(config.server.enable_logs, expected, "ENABLE_LOGS={value}");
        }
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[("PROXY_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref key, .. } if key == "PROXY_PORT"));
    }

    #[test]
    fn test_blank_env_values_keep_defaults() {
        let mut config = Config::default();
        config.apply_env(env(&[
            ("PROXY_PORT", ""),
            ("PROXY_TIMEOUT_SECS", " "),
            ("DIST_DIR", ""),
            ("ENABLE_LOGS", ""),
            ("PROXY_REDIRECT_ORIGIN", ""),
        ])).unwrap();

        assert_eq!(config.server.port, 5173);
        assert_eq!(config.proxy.timeout_secs, 30);
        assert_eq!(config.server.dist_dir, PathBuf::from("./dist"));
        assert!(config.server.enable_logs);
        assert_eq!(config.proxy.origin, None);
    }

    #[test]
    fn test_missing_origin_fails_validation() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingProxyOrigin)));
    }

    #[test]
    fn test_non_http_origin_fails_validation() {
        let mut config = Config::default();
        config.proxy.origin = Some("ftp://files.example".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidProxyOrigin { .. })));
    }

    #[test]
    fn test_toml_sections_and_env_precedence() {
        let mut config = Config::from_toml(r#"
            [server]
            port = 3000
            dist_dir = "build"

            [proxy]
            origin = "https://api.mokshaix.in"

            [[mounts]]
            prefix = "/static"
            dir = "static"
            max_age = 60
        "#).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.mounts, vec![StaticMount::new("/static", "static", Some(60))]);

        config.apply_env(env(&[("PROXY_PORT", "4000")])).unwrap();
        assert_eq!(config.server.port, 4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trailing_slash_prefix_rejected() {
        let mut config = Config::default();
        config.proxy.origin = Some("http://localhost:8000".to_string());
        config.mounts.push(StaticMount::new("/fonts/", "fonts", None));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMountPrefix(_))));
    }

    #[test]
    fn test_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moksha.toml");
        std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("moksha.toml"));
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let example = Config::from_toml(include_str!("../../../moksha.example.toml")).unwrap();
        let defaults = Config::default();
        assert_eq!(example.mounts, defaults.mounts);
        assert_eq!(example.server.port, defaults.server.port);
        assert!(example.validate().is_ok());
    }
}
