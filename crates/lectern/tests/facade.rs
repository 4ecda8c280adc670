use chrono::{TimeDelta, TimeZone, Utc};
use lectern::domain::Tier;
use lectern::domain::config::{LecternConfig, StorageBackend};
use lectern::features::release::CountdownState;
use lectern::kernel::ManualClock;
use lectern::{Lectern, LecternError, LessonBody, StateStore};
use std::sync::Arc;

fn before_live_review() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2030, 1, 15, 19, 0, 0).unwrap())
}

fn memory_config() -> LecternConfig {
    let mut config = LecternConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config
}

async fn memory_app(clock: ManualClock) -> Lectern {
    Lectern::init(&memory_config(), Arc::new(clock)).await.unwrap()
}

#[tokio::test]
async fn starts_logged_out_with_the_embedded_catalog() {
    let app = memory_app(before_live_review()).await;

    assert_eq!(app.tier(), None);
    assert_eq!(app.course().modules().len(), 4);
    assert_eq!(app.course_progress().percentage, 0);

    let welcome = app.lesson_view("welcome").unwrap();
    assert_eq!(welcome.module.id, "getting-started");
    assert!(welcome.access.playable);
    assert!(!welcome.completed);
}

#[tokio::test]
async fn login_unlocks_lessons_up_to_the_tier() {
    let app = memory_app(before_live_review()).await;
    assert!(app.access(app.course().lesson("distributions").unwrap()).locked);

    assert_eq!(app.session().login("I am Gold").await.unwrap(), Some(Tier::Gold));

    let distributions = app.lesson_view("distributions").unwrap();
    assert!(distributions.access.playable);
    let forecasting = app.lesson_view("forecasting-basics").unwrap();
    assert!(forecasting.access.locked);
}

#[tokio::test]
async fn live_lesson_is_pending_until_release() {
    let clock = before_live_review();
    let app = memory_app(clock.clone()).await;
    app.session().login("iamsupreme").await.unwrap();

    let view = app.lesson_view("live-review").unwrap();
    assert!(view.access.pending);
    assert!(!view.access.locked);
    assert!(!view.access.playable);

    let CountdownState::Counting(left) = app.countdown("live-review").unwrap().state() else {
        panic!("expected a running countdown");
    };
    assert_eq!((left.days, left.hours, left.minutes, left.seconds), (0, 1, 0, 0));

    clock.advance(TimeDelta::hours(1));
    assert!(app.lesson_view("live-review").unwrap().access.playable);
    assert!(app.countdown("live-review").unwrap().is_released());
}

#[tokio::test]
async fn lessons_without_release_have_no_countdown() {
    let app = memory_app(before_live_review()).await;
    assert!(app.countdown("welcome").is_none());
    assert!(app.countdown("missing").is_none());
    assert!(app.countdown_ticker("welcome").unwrap().is_none());
}

#[tokio::test]
async fn module_view_reports_completion() {
    let app = memory_app(before_live_review()).await;
    app.progress().toggle("workspace-setup").await.unwrap();

    let module = &app.course().modules()[0];
    let view = app.module_view(module);
    let completed: Vec<_> = view.iter().map(|v| v.completed).collect();
    assert_eq!(completed, [false, true, false]);
    assert_eq!(app.progress().module_progress(module).percentage, 33);
}

#[tokio::test]
async fn file_backend_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = LecternConfig::default();
    config.storage.data_dir = tmp.path().join("state");

    {
        let app = Lectern::init(&config, Arc::new(before_live_review())).await.unwrap();
        app.session().login("teamsilver").await.unwrap();
        app.progress().toggle("welcome").await.unwrap();
        app.progress().toggle("cleaning-data").await.unwrap();
    }

    let app = Lectern::init(&config, Arc::new(before_live_review())).await.unwrap();
    assert_eq!(app.tier(), Some(Tier::Silver));
    assert_eq!(app.progress().completed_count(), 2);
    assert_eq!(app.course_progress().completed, 2);
}

#[tokio::test]
async fn state_store_follows_backend() {
    let store = StateStore::open(&memory_config().storage).await.unwrap();
    assert!(matches!(store, StateStore::Memory(_)));
}

#[tokio::test]
async fn missing_catalog_file_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = memory_config();
    config.catalog.path = Some(tmp.path().join("absent.json"));

    let err = Lectern::init(&config, Arc::new(before_live_review())).await.unwrap_err();
    assert!(matches!(err, LecternError::Catalog { .. }));
}

#[tokio::test]
async fn preview_rotation_only_draws_lessons_with_video() {
    let app = memory_app(before_live_review()).await;
    let mut rotation = app.preview_rotation();
    assert_eq!(rotation.len(), app.course().total_lessons() - 1);

    for _ in 0..20 {
        let preview = rotation.next_preview().unwrap();
        assert_ne!(preview.lesson_id, "live-review");
        assert!(preview.url.starts_with(&app.config().player.embed_base));
    }
}

const PAGE: &str = "https://course.test/lesson?id=1";

#[tokio::test]
async fn pending_page_hides_lesson_material() {
    let clock = before_live_review();
    let app = memory_app(clock.clone()).await;
    app.session().login("iamsupreme").await.unwrap();

    let page = app.lesson_page("live-review", PAGE).unwrap();
    let LessonBody::Pending { countdown: CountdownState::Counting(left), .. } = page.body else {
        panic!("expected a pending page, got {:?}", page.body);
    };
    assert_eq!(left.hours, 1);

    clock.advance(TimeDelta::hours(1));
    let page = app.lesson_page("live-review", PAGE).unwrap();
    let LessonBody::Playable { player_url, contact, buttons, .. } = page.body else {
        panic!("expected a playable page, got {:?}", page.body);
    };
    assert_eq!(player_url, None);
    assert!(contact.is_some());
    assert_eq!(buttons.len(), 2);
}

#[tokio::test]
async fn locked_page_hides_lesson_material() {
    let app = memory_app(before_live_review()).await;

    let page = app.lesson_page("model-evaluation", PAGE).unwrap();
    assert_eq!(page.body, LessonBody::Locked { required: Tier::Diamond });
    assert!(app.lesson_page("missing", PAGE).is_none());
}

#[tokio::test]
async fn playable_page_links_the_player() {
    let app = memory_app(before_live_review()).await;

    let page = app.lesson_page("welcome", PAGE).unwrap();
    let LessonBody::Playable { player_url: Some(url), .. } = page.body else {
        panic!("expected a player url, got {:?}", page.body);
    };
    assert!(url.contains("/6a1f0c2e9b7d4e01/v4/embed.html?id=1&vl="));
}

#[tokio::test]
async fn completion_requires_a_playable_video() {
    let clock = before_live_review();
    let app = memory_app(clock.clone()).await;

    let err = app.toggle_completion("forecasting-basics").await.unwrap_err();
    assert!(matches!(err, LecternError::Locked { .. }));

    app.session().login("iamsupreme").await.unwrap();
    let err = app.toggle_completion("live-review").await.unwrap_err();
    assert!(matches!(err, LecternError::Pending { .. }));

    clock.advance(TimeDelta::days(1));
    let err = app.toggle_completion("live-review").await.unwrap_err();
    assert!(matches!(err, LecternError::NoMedia { .. }));

    let err = app.toggle_completion("missing").await.unwrap_err();
    assert!(matches!(err, LecternError::UnknownLesson { .. }));
    assert_eq!(app.progress().completed_count(), 0);

    assert!(app.toggle_completion("forecasting-basics").await.unwrap());
    assert!(!app.toggle_completion("forecasting-basics").await.unwrap());
}
