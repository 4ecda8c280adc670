use chrono::{TimeDelta, TimeZone, Utc};
use lectern_kernel::{Clock, ManualClock};
use lectern_release::*;
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap())
}

#[tokio::test(start_paused = true)]
async fn ticker_publishes_each_second_until_released() {
    let clock = clock();
    let countdown = Countdown::new(clock.now() + TimeDelta::seconds(3), clock.now());
    let ticker = CountdownTicker::spawn(countdown, Arc::new(clock.clone()), TICK).unwrap();
    let mut rx = ticker.subscribe();

    let CountdownState::Counting(left) = ticker.state() else { panic!("expected counting") };
    assert_eq!(left.seconds, 3);

    clock.advance(TimeDelta::seconds(1));
    rx.changed().await.unwrap();
    let CountdownState::Counting(left) = *rx.borrow_and_update() else {
        panic!("expected counting")
    };
    assert_eq!(left.seconds, 2);

    clock.advance(TimeDelta::seconds(2));
    tokio::time::timeout(Duration::from_secs(5), ticker.released()).await.unwrap();
    assert!(ticker.state().is_released());

    tokio::time::sleep(TICK).await;
    assert!(ticker.is_finished());
}

#[tokio::test(start_paused = true)]
async fn already_released_never_ticks() {
    let clock = clock();
    let countdown = Countdown::new(clock.now() - TimeDelta::seconds(1), clock.now());
    let ticker = CountdownTicker::spawn(countdown, Arc::new(clock), TICK).unwrap();

    assert!(ticker.state().is_released());
    ticker.released().await;
}

#[tokio::test(start_paused = true)]
async fn clock_going_backwards_does_not_unrelease() {
    let clock = clock();
    let release = clock.now() + TimeDelta::seconds(1);
    let ticker =
        CountdownTicker::spawn(Countdown::new(release, clock.now()), Arc::new(clock.clone()), TICK)
            .unwrap();

    clock.advance(TimeDelta::seconds(2));
    ticker.released().await;

    clock.set(release - TimeDelta::hours(1));
    tokio::time::sleep(TICK * 3).await;
    assert!(ticker.state().is_released());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_ticker_stops_the_task() {
    let clock = clock();
    let countdown = Countdown::new(clock.now() + TimeDelta::days(30), clock.now());
    let ticker = CountdownTicker::spawn(countdown, Arc::new(clock), TICK).unwrap();
    let mut rx = ticker.subscribe();

    drop(ticker);

    let closed = tokio::time::timeout(Duration::from_secs(5), async {
        while rx.changed().await.is_ok() {}
    })
    .await;
    assert!(closed.is_ok(), "sender should be dropped once the task is aborted");
}

#[tokio::test]
async fn zero_period_is_rejected() {
    let clock = clock();
    let countdown = Countdown::new(clock.now(), clock.now());
    let err = CountdownTicker::spawn(countdown, Arc::new(clock), Duration::ZERO).unwrap_err();
    assert!(matches!(err, ReleaseError::InvalidPeriod { .. }));
}

#[test]
fn spawning_outside_a_runtime_fails() {
    let clock = clock();
    let countdown = Countdown::new(clock.now() + TimeDelta::seconds(5), clock.now());
    let err = CountdownTicker::spawn(countdown, Arc::new(clock), TICK).unwrap_err();
    assert!(matches!(err, ReleaseError::Runtime { .. }));
}
