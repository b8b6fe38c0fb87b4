// Configuration loading, validation and persistence.
use turnover::config::Config;
use turnover::context::{AppContext, TestContext};
use turnover::model::PropertySpec;

#[test]
fn test_missing_config_is_detectable() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err));
}

#[test]
fn test_defaults_fill_in() {
    let config = Config::from_toml_str(
        r#"
[[properties]]
id = "estudio"
name = "El estudio"
calendars = [{ label = "Airbnb", url = "https://a.test/1.ics" }]
"#,
    )
    .unwrap();
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.max_concurrent_fetches, 4);
    assert_eq!(config.max_redirects, 5);
    assert!(config.user_agent.starts_with("Turnover/"));
    assert_eq!(config.properties[0].color, None);
    // A stable color is derived from the id
    let color = config.properties[0].display_color();
    assert_eq!(color.len(), 7);
    assert_eq!(color, config.properties[0].display_color());
}

#[test]
fn test_locator_alias_and_empty_calendars() {
    let config = Config::from_toml_str(
        r#"
[[properties]]
id = "a"
name = "A"
calendars = [{ label = "VRBO", locator = "https://v.test/a.ics" }]

[[properties]]
id = "b"
name = "B"
"#,
    )
    .unwrap();
    assert_eq!(config.properties[0].calendars[0].url, "https://v.test/a.ics");
    assert!(config.properties[1].calendars.is_empty());
    assert!(config.property("b").is_some());
    assert!(config.property("c").is_none());
}

#[test]
fn test_invalid_configs_are_rejected() {
    let duplicate = r#"
[[properties]]
id = "a"
name = "A"

[[properties]]
id = "a"
name = "Also A"
"#;
    let err = Config::from_toml_str(duplicate).unwrap_err();
    assert!(err.to_string().contains("Duplicate"));

    let empty_id = "[[properties]]\nid = \" \"\nname = \"Nameless\"\n";
    assert!(Config::from_toml_str(empty_id).is_err());

    assert!(Config::from_toml_str("timeout_secs = \"soon\"").is_err());
}

#[test]
fn test_save_then_load() {
    let ctx = TestContext::new();
    let config = Config {
        proxy_url: Some("https://proxy.test/ical".to_string()),
        max_concurrent_fetches: 2,
        properties: vec![
            PropertySpec::new("studio", "The Studio")
                .with_color("#8b5cf6")
                .with_feed("Airbnb", "https://a.test/s.ics"),
        ],
        ..Config::default()
    };
    config.save(&ctx).unwrap();
    assert!(ctx.get_config_file_path().unwrap().exists());

    let loaded = Config::load(&ctx).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_unparsable_file_is_not_missing() {
    let ctx = TestContext::new();
    std::fs::write(ctx.get_config_file_path().unwrap(), "properties = 7").unwrap();
    let err = Config::load(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(err.to_string().contains("Failed to parse"));
}
