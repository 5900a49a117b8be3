//! End-to-end game flow against scripted photo services

use std::time::Duration;

use find_or_lose::run_engine;
use fol_app::config::Settings;
use fol_app::{Engine, EngineEvent, Message};
use fol_core::{GamePhase, NetworkError, StopReason};
use fol_photos::test_utils::{test_descriptor, StubFetcher, StubProvider};
use fol_photos::RoundBuilder;
use tokio::sync::broadcast::Receiver;

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.photos.access_token = "integration-token".to_string();
    settings
}

fn engine_with(provider: StubProvider, fetcher: StubFetcher) -> Engine<StubProvider, StubFetcher> {
    Engine::new(settings(), RoundBuilder::new(provider, fetcher))
}

async fn wait_for_round(engine: &mut Engine<StubProvider, StubFetcher>) {
    while engine.session().is_loading() {
        assert!(engine.process_next_message().await);
    }
}

fn collect(rx: &mut Receiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn test_correct_then_wrong_guess() {
    let mut engine = engine_with(StubProvider::new(), StubFetcher::new());

    engine.start();
    wait_for_round(&mut engine).await;
    assert_eq!((engine.session().level, engine.session().score), (1, 200));

    let round = engine.session().round.clone().unwrap();
    let singleton = round.singleton_index().unwrap();
    let repeated = (singleton + 1) % 4;
    assert_eq!(
        round.get(singleton).unwrap().descriptor.photo_id.as_deref(),
        Some("photo-1")
    );

    engine.guess(repeated);
    wait_for_round(&mut engine).await;
    assert_eq!((engine.session().level, engine.session().score), (2, 400));
    assert!(engine.is_timer_active());

    let singleton = engine.session().round.as_ref().unwrap().singleton_index().unwrap();
    engine.guess(singleton);

    assert_eq!(engine.session().phase, GamePhase::Stopped);
    assert_eq!(engine.session().last_stop, Some(StopReason::WrongGuess));
    assert_eq!((engine.session().level, engine.session().score), (0, 0));
    assert!(engine.session().round.is_none());
    assert!(!engine.is_timer_active());
    assert_eq!(engine.session().guess_count, 2);
}

#[tokio::test(start_paused = true)]
async fn test_stop_during_pending_build_then_restart() {
    let (provider, gate) = StubProvider::new().gated();
    let mut engine = engine_with(provider, StubFetcher::new());
    let mut events = engine.subscribe();

    engine.start();
    tokio::task::yield_now().await;
    engine.stop();

    gate.release(2);
    tokio::time::sleep(Duration::from_secs(1)).await;
    engine.drain_pending_messages();

    assert_eq!(engine.session().phase, GamePhase::Stopped);
    assert_eq!(engine.session().score, 0);
    assert!(engine.session().round.is_none());
    assert!(!collect(&mut events)
        .iter()
        .any(|e| matches!(e, EngineEvent::RoundReady { .. })));

    // The cancelled build left its permits unused; the restart takes them
    engine.start();
    wait_for_round(&mut engine).await;

    assert_eq!(engine.session().active_round_id(), Some(2));
    assert_eq!((engine.session().level, engine.session().score), (1, 200));
}

#[tokio::test(start_paused = true)]
async fn test_provider_failure_returns_to_stopped() {
    let provider =
        StubProvider::with_responses(vec![Err(NetworkError::transport("offline"))]);
    let mut engine = engine_with(provider, StubFetcher::new());
    let mut events = engine.subscribe();

    engine.start();
    assert!(engine.process_next_message().await);

    assert_eq!(engine.session().phase, GamePhase::Stopped);
    assert!(engine.session().round.is_none());
    assert!(!engine.is_timer_active());

    let stopped = collect(&mut events)
        .into_iter()
        .find_map(|e| match e {
            EngineEvent::GameStopped { reason } => Some(reason),
            _ => None,
        })
        .unwrap();
    assert!(matches!(stopped, StopReason::RoundFailed { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_returns_to_stopped() {
    let repeated = test_descriptor("broken");
    let provider = StubProvider::with_responses(vec![
        Ok(test_descriptor("fine")),
        Ok(repeated.clone()),
    ]);
    let fetcher = StubFetcher::new().fail_for(&repeated.url);
    let mut engine = engine_with(provider, fetcher);

    engine.start();
    assert!(engine.process_next_message().await);

    assert_eq!(engine.session().phase, GamePhase::Stopped);
    assert!(engine.session().round.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_score_runs_out_after_twenty_ticks() {
    let mut engine = engine_with(StubProvider::new(), StubFetcher::new());

    engine.start();
    wait_for_round(&mut engine).await;
    let shown_at = tokio::time::Instant::now();

    while engine.session().is_playing() {
        assert!(engine.process_next_message().await);
    }

    let elapsed = shown_at.elapsed();
    assert!(elapsed >= Duration::from_secs(2), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(2100), "{:?}", elapsed);
    assert_eq!(engine.session().last_stop, Some(StopReason::ScoreExhausted));
    assert_eq!(engine.session().score, 0);
    assert!(!engine.is_timer_active());
}

#[tokio::test(start_paused = true)]
async fn test_run_engine_exits_on_quit() {
    let engine = engine_with(StubProvider::new(), StubFetcher::new());
    let tx = engine.msg_sender();

    tx.send(Message::Start).await.unwrap();
    tx.send(Message::Quit).await.unwrap();

    run_engine(engine).await.unwrap();
}
