use lectern_domain::Tier;
use lectern_domain::config::{LecternConfig, LogFormat, StorageBackend};
use serde_json::json;
use std::time::Duration;

#[test]
fn config_defaults_are_sane() {
    let cfg = LecternConfig::default();

    assert_eq!(cfg.storage.backend, StorageBackend::File);
    assert!(cfg.catalog.path.is_none());
    assert_eq!(cfg.session.secrets.len(), 3);
    assert_eq!(cfg.player.preview_interval(), Duration::from_secs(5));
    assert_eq!(cfg.player.preview_tail_secs, 10);
    assert_eq!(cfg.release.tick(), Duration::from_secs(1));
    assert_eq!(cfg.log.format, LogFormat::Text);
}

#[test]
fn default_secrets_cover_every_tier() {
    let cfg = LecternConfig::default();
    for tier in Tier::ALL {
        assert!(cfg.session.secrets.values().any(|t| *t == tier), "{tier} has no secret");
    }
}

#[test]
fn partial_config_keeps_other_defaults() {
    let raw = json!({
        "storage": { "backend": "memory" },
        "session": { "secrets": { "open sesame": "gold" } },
        "player": { "embed_base": "https://cdn.test/players" }
    });

    let cfg: LecternConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.storage.backend, StorageBackend::Memory);
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from(".lectern"));
    assert_eq!(cfg.session.secrets.get("open sesame"), Some(&Tier::Gold));
    assert_eq!(cfg.player.embed_base, "https://cdn.test/players");
    assert_eq!(cfg.player.preview_interval_secs, 5);
}

#[test]
fn clones_are_copy_on_write() {
    let base = LecternConfig::default();
    let mut changed = base.clone();
    changed.release.tick_millis = 10;

    assert_eq!(base.release.tick_millis, 1000);
    assert_eq!(changed.release.tick(), Duration::from_millis(10));
}
