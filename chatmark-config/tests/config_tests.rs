use chatmark_config::{Config, ConfigError, DiagramEngine, LogLevel};

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert!(config.markdown.html);
    assert!(config.markdown.linkify);
    assert!(config.markdown.breaks);
    assert_eq!(config.markdown.root_class, "chatmark-md");
    assert_eq!(config.diagrams.languages, vec!["mermaid".to_string()]);
    assert_eq!(config.diagrams.engine, DiagramEngine::Auto);
    assert_eq!(config.clipboard.copied_feedback_ms, 1000);
    assert_eq!(config.search.excluded_tags, vec!["script", "style", "svg"]);
    assert_eq!(config.selection.anchor_offset_x, 10.0);
    assert_eq!(config.selection.anchor_offset_y, -20.0);
    assert_eq!(config.log_level, LogLevel::Off);
}

#[test]
fn test_partial_yaml_fills_defaults() {
    let yaml = "diagrams:\n  languages: [mermaid, dot]\n  engine: text_fallback\nlog_level: debug\n";
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.diagrams.languages, vec!["mermaid", "dot"]);
    assert_eq!(config.diagrams.engine, DiagramEngine::TextFallback);
    assert!(config.diagrams.enabled);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.clipboard.copied_feedback_ms, 1000);
}

#[test]
fn test_empty_yaml_is_default() {
    let config = Config::from_yaml("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_diagram_tag_rejected() {
    let yaml = "diagrams:\n  languages: [\"\"]\n";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_zero_feedback_duration_rejected() {
    let yaml = "clipboard:\n  copied_feedback_ms: 0\n";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let err = Config::from_yaml("markdown: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = Config::default();
    config.markdown.linkify = false;
    config.search.highlight_class = "hit".to_string();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(!path.with_extension("yaml.tmp").exists());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Config::load_from(&dir.path().join("absent.yaml")).unwrap();
    assert_eq!(loaded, Config::default());
}

#[test]
fn test_log_level_parsing() {
    assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
    assert!("loud".parse::<LogLevel>().is_err());
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
}
