use lectern_events::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct TierChanged(Option<&'static str>);

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProgressChanged(usize);

#[tokio::test]
async fn test_event_flow() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TierChanged>().unwrap();

    assert_eq!(bus.publish(TierChanged(Some("gold"))).unwrap(), 1);

    let event = rx.recv_event().await.unwrap();
    assert_eq!(*event, TierChanged(Some("gold")));
}

#[tokio::test]
async fn test_publish_without_subscribers_is_dropped() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(ProgressChanged(1)).unwrap(), 0);
}

#[tokio::test]
async fn test_multiple_subscribers_each_receive() {
    let bus = EventBus::new();
    let mut a = bus.subscribe::<ProgressChanged>().unwrap();
    let mut b = bus.subscribe::<ProgressChanged>().unwrap();

    assert_eq!(bus.publish(ProgressChanged(3)).unwrap(), 2);
    assert_eq!(*a.recv_event().await.unwrap(), ProgressChanged(3));
    assert_eq!(*b.recv_event().await.unwrap(), ProgressChanged(3));
}

#[tokio::test]
async fn test_event_types_are_isolated() {
    let bus = EventBus::new();
    let mut tiers = bus.subscribe::<TierChanged>().unwrap();
    let _progress = bus.subscribe::<ProgressChanged>().unwrap();

    bus.publish(ProgressChanged(1)).unwrap();
    bus.publish(TierChanged(None)).unwrap();

    assert_eq!(*tiers.recv_event().await.unwrap(), TierChanged(None));
}

#[tokio::test]
async fn test_ordering_is_preserved() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<ProgressChanged>().unwrap();

    for n in 0..10 {
        bus.publish(ProgressChanged(n)).unwrap();
    }
    for n in 0..10 {
        assert_eq!(*rx.recv_event().await.unwrap(), ProgressChanged(n));
    }
}

#[tokio::test]
async fn test_receiver_recovers_from_lag() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<ProgressChanged>().unwrap();

    let overflow = DEFAULT_CAPACITY + 3;
    for n in 0..overflow {
        bus.publish(ProgressChanged(n)).unwrap();
    }

    assert_eq!(*rx.recv_event().await.unwrap(), ProgressChanged(3));
    assert_eq!(*rx.recv_event().await.unwrap(), ProgressChanged(4));
}

#[tokio::test]
async fn test_clones_share_channels() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TierChanged>().unwrap();

    assert_eq!(bus.clone().publish(TierChanged(Some("diamond"))).unwrap(), 1);
    assert_eq!(*rx.recv_event().await.unwrap(), TierChanged(Some("diamond")));
}

#[tokio::test]
async fn test_dropped_receiver_stops_counting() {
    let bus = EventBus::new();
    let rx = bus.subscribe::<TierChanged>().unwrap();
    drop(rx);

    assert_eq!(bus.publish(TierChanged(None)).unwrap(), 0);
}
