// tests/listener.rs

use std::error::Error;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use fswatch::types::{Op, Trigger};
use fswatch::watch::{Listener, OpFilter, WatchEvent};
use fswatch_test_utils::fake_sink::RecordingSink;
use fswatch_test_utils::feed::WatchFeed;
use fswatch_test_utils::{eventually, init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn unknown_event_name_fails_construction() {
    let err = Listener::new(&["create", "bogus"]).unwrap_err();
    assert_eq!(err.to_string(), r#"unknown event type "bogus""#);
}

#[test]
fn empty_event_list_watches_everything() -> TestResult {
    let none: Vec<String> = Vec::new();
    let listener = Listener::new(&none)?;
    assert_eq!(*listener.filter(), OpFilter::PassAll);

    let trigger = listener
        .accept(&WatchEvent::new("/tmp/x", Op::EMPTY))
        .expect("pass-all accepts an empty op set");
    assert_eq!(trigger, Trigger::new("/tmp/x", vec![]));
    Ok(())
}

#[test]
fn accept_builds_sorted_trigger() -> TestResult {
    let listener = Listener::new(&["rename"])?;

    let trigger = listener
        .accept(&WatchEvent::new("/tmp/y", Op::RENAME | Op::CREATE))
        .expect("rename matches");
    assert_eq!(trigger.events, vec!["create", "rename"]);

    assert!(listener.accept(&WatchEvent::new("/tmp/y", Op::WRITE)).is_none());
    Ok(())
}

#[tokio::test]
async fn channel_dispatch_forwards_accepted_events_in_order() -> TestResult {
    init_tracing();

    let mut listener = Listener::new(&["create", "write"])?;
    let mut triggers = listener.subscribe().expect("first subscribe");
    assert!(listener.subscribe().is_none(), "channel can only be taken once");

    let (feed, mut events, mut errors) = WatchFeed::new();
    let cancel = CancellationToken::new();

    let task = {
        let cancel = cancel.clone();
        tokio::spawn(async move { listener.listen(&cancel, &mut events, &mut errors).await })
    };

    feed.event("/w/a", Op::CREATE);
    feed.event("/w/skipped", Op::CHMOD);
    feed.event("/w/b", Op::WRITE | Op::CHMOD);
    feed.event("/w/c", Op::REMOVE);
    feed.event("/w/d", Op::CREATE | Op::WRITE);

    let mut got = Vec::new();
    for _ in 0..3 {
        got.push(with_timeout(triggers.recv()).await.expect("listener still running"));
    }

    assert_eq!(
        got,
        vec![
            Trigger::new("/w/a", vec!["create".into()]),
            Trigger::new("/w/b", vec!["chmod".into(), "write".into()]),
            Trigger::new("/w/d", vec!["create".into(), "write".into()]),
        ]
    );

    cancel.cancel();
    with_timeout(task).await??;
    Ok(())
}

#[tokio::test]
async fn watch_errors_are_not_fatal() -> TestResult {
    init_tracing();

    let listener = Listener::new(&["create"])?;
    let (feed, mut events, mut errors) = WatchFeed::new();
    let mut sink = RecordingSink::new();
    let cancel = CancellationToken::new();

    let task = {
        let cancel = cancel.clone();
        let mut sink = sink.clone();
        tokio::spawn(async move {
            listener
                .listen_into(&cancel, &mut events, &mut errors, &mut sink)
                .await
        })
    };

    feed.error("queue overflow");
    feed.error("permission denied");
    feed.event("/w/after-errors", Op::CREATE);

    eventually(|| sink.paths() == vec!["/w/after-errors".to_string()]).await;
    assert!(!task.is_finished());

    cancel.cancel();
    with_timeout(task).await??;

    // The sink is still usable by its owner after the listener is gone.
    fswatch::exec::TriggerSink::dispatch(&mut sink, Trigger::new("/manual", vec![])).await?;
    assert_eq!(sink.received().len(), 2);
    Ok(())
}

#[tokio::test]
async fn closed_error_stream_does_not_stop_listening() -> TestResult {
    init_tracing();

    let listener = Listener::new(&["write"])?;
    let (mut feed, mut events, mut errors) = WatchFeed::new();
    let sink = RecordingSink::new();
    let cancel = CancellationToken::new();

    let task = {
        let cancel = cancel.clone();
        let mut sink = sink.clone();
        tokio::spawn(async move {
            listener
                .listen_into(&cancel, &mut events, &mut errors, &mut sink)
                .await
        })
    };

    feed.close_errors();
    feed.event("/w/still-heard", Op::WRITE);
    eventually(|| sink.received().len() == 1).await;

    cancel.cancel();
    with_timeout(task).await??;
    Ok(())
}

#[tokio::test]
async fn closed_event_stream_ends_the_listener() -> TestResult {
    init_tracing();

    let listener = Listener::new(&["create"])?;
    let (mut feed, mut events, mut errors) = WatchFeed::new();
    let mut sink = RecordingSink::new();
    let cancel = CancellationToken::new();

    feed.event("/w/last", Op::CREATE);
    feed.close_events();

    with_timeout(listener.listen_into(&cancel, &mut events, &mut errors, &mut sink)).await?;
    assert_eq!(sink.paths(), vec!["/w/last".to_string()]);
    assert!(!cancel.is_cancelled());
    Ok(())
}

#[tokio::test]
async fn slow_sink_applies_backpressure() -> TestResult {
    init_tracing();

    let listener = Listener::new(&["create"])?;
    let (feed, mut events, mut errors) = WatchFeed::new();
    let sink = RecordingSink::gated();
    let cancel = CancellationToken::new();

    let task = {
        let cancel = cancel.clone();
        let mut sink = sink.clone();
        tokio::spawn(async move {
            listener
                .listen_into(&cancel, &mut events, &mut errors, &mut sink)
                .await
        })
    };

    feed.event("/w/1", Op::CREATE);
    feed.event("/w/2", Op::CREATE);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(sink.received().is_empty(), "sink has not been released yet");

    sink.release(1);
    eventually(|| sink.paths() == vec!["/w/1".to_string()]).await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sink.received().len(), 1, "second trigger waits for the sink");

    sink.release(1);
    eventually(|| sink.paths() == vec!["/w/1".to_string(), "/w/2".to_string()]).await;

    cancel.cancel();
    with_timeout(task).await??;
    Ok(())
}

#[tokio::test]
async fn cancellation_interrupts_a_blocked_hand_off() -> TestResult {
    init_tracing();

    let listener = Listener::new(&["create"])?;
    let (feed, mut events, mut errors) = WatchFeed::new();
    let sink = RecordingSink::gated();
    let cancel = CancellationToken::new();

    let task = {
        let cancel = cancel.clone();
        let mut sink = sink.clone();
        tokio::spawn(async move {
            listener
                .listen_into(&cancel, &mut events, &mut errors, &mut sink)
                .await
        })
    };

    feed.event("/w/stuck", Op::CREATE);
    tokio::time::sleep(Duration::from_millis(50)).await;

    cancel.cancel();
    with_timeout(task).await??;
    assert!(sink.received().is_empty());
    Ok(())
}

#[tokio::test]
async fn dropped_consumer_stops_channel_listener() -> TestResult {
    init_tracing();

    let mut listener = Listener::new(&["create"])?;
    drop(listener.subscribe());

    let (feed, mut events, mut errors) = WatchFeed::new();
    let cancel = CancellationToken::new();
    feed.event("/w/orphan", Op::CREATE);

    let res = with_timeout(listener.listen(&cancel, &mut events, &mut errors)).await;
    assert!(matches!(res, Err(fswatch::errors::FswatchError::SinkClosed)));
    Ok(())
}
