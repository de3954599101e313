use super::*;
use crate::error::BookError;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("negamax_{}_{}", std::process::id(), name))
}

#[test]
fn test_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.search_depth, 3);
    assert!(config.use_default_bonuses);
}

#[test]
fn test_partial_config() {
    let config = EngineConfig::from_toml_str(
        r#"
search_depth = 5
start_fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1"
rng_seed = 7
"#,
    )
    .unwrap();
    assert_eq!(config.search_depth, 5);
    assert_eq!(config.rng_seed, Some(7));
    assert!(config.book_file.is_none());

    let game = config.build_game().unwrap();
    assert_eq!(game.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
}

#[test]
fn test_toml_round_trip() {
    let config = EngineConfig {
        search_depth: 4,
        book_file: Some(PathBuf::from("book.json")),
        use_default_bonuses: false,
        ..EngineConfig::default()
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_malformed_toml() {
    assert!(matches!(
        EngineConfig::from_toml_str("search_depth = \"deep\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_bonus_selection() {
    let mut config = EngineConfig::default();
    assert_eq!(config.bonuses().unwrap(), Some(SquareBonuses::standard()));

    config.use_default_bonuses = false;
    assert_eq!(config.bonuses().unwrap(), None);
    assert_eq!(config.build_game().unwrap().evaluation(), 0);

    config.square_bonuses_file = Some(temp_path("missing_bonuses.txt"));
    assert!(matches!(config.bonuses(), Err(ConfigError::Bonuses(_))));
}

#[test]
fn test_bonus_file_is_loaded() {
    let path = temp_path("bonuses.txt");
    let mut text = String::from("n\n");
    for _ in 0..8 {
        text.push_str("5,5,5,5,5,5,5,5\n");
    }
    std::fs::write(&path, text).unwrap();

    let config = EngineConfig {
        square_bonuses_file: Some(path.clone()),
        start_fen: Some("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1".to_string()),
        ..EngineConfig::default()
    };
    let game = config.build_game().unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(game.evaluation(), 305);
}

#[test]
fn test_invalid_start_fen() {
    let config = EngineConfig {
        start_fen: Some("not a fen".to_string()),
        ..EngineConfig::default()
    };
    assert!(matches!(config.build_game(), Err(ConfigError::Fen(_))));
}

#[test]
fn test_build_engine() {
    let config = EngineConfig {
        search_depth: 0,
        ..EngineConfig::default()
    };
    assert!(matches!(config.build_engine(), Err(ConfigError::Depth(0))));

    let config = EngineConfig {
        search_depth: 2,
        rng_seed: Some(1),
        ..EngineConfig::default()
    };
    let engine = config.build_engine().unwrap();
    assert_eq!(engine.depth(), 2);
    assert!(engine.book().is_none());

    let config = EngineConfig {
        book_file: Some(temp_path("missing_book.json")),
        ..EngineConfig::default()
    };
    assert!(matches!(
        config.build_engine(),
        Err(ConfigError::Book(BookError::Io(_)))
    ));
}

#[test]
fn test_load_from_file() {
    let path = temp_path("engine.toml");
    std::fs::write(&path, "search_depth = 2\nuse_default_bonuses = false\n").unwrap();
    let config = EngineConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(config.search_depth, 2);
    assert!(!config.use_default_bonuses);
    assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Io(_))));
}
