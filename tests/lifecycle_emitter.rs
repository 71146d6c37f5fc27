// tests/lifecycle_emitter.rs

mod common;
use crate::common::{buffered_output, parse_input, watch_definition};

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

use testwatch::errors::{Result, TestwatchError};
use testwatch::host::{
    Configuration, Environment, Input, LifecycleEmitter, LifecycleEvent, LifecycleListener,
    SharedListener, SharedOutput, Subscription,
};
use testwatch::types::BoxFuture;

/// Records every call and optionally drops itself from `end` or fails it.
#[derive(Default)]
struct Recorder {
    calls: Arc<StdMutex<Vec<String>>>,
    unsubscribe_on_end: bool,
    fail_on_end: bool,
}

impl LifecycleListener for Recorder {
    fn on_configure(&mut self, configuration: &Configuration) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("configure {}", configuration.path().display()));
    }

    fn on_start(&mut self, _environment: &mut Environment) {
        self.calls.lock().unwrap().push("start".to_string());
    }

    fn on_end<'a>(
        &'a mut self,
        subscription: &'a Subscription,
        exit_code: i32,
        _input: &'a Input,
        _output: &'a SharedOutput,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(format!("end {exit_code}"));
            if self.unsubscribe_on_end {
                subscription.unsubscribe();
            }
            if self.fail_on_end {
                return Err(TestwatchError::ConfigError("end failed".to_string()));
            }
            Ok(())
        })
    }
}

fn shared(recorder: Recorder) -> SharedListener {
    Arc::new(Mutex::new(recorder))
}

#[tokio::test]
async fn events_reach_only_their_subscribers() {
    let calls = Arc::new(StdMutex::new(Vec::new()));
    let listener = shared(Recorder {
        calls: calls.clone(),
        ..Recorder::default()
    });

    let mut emitter = LifecycleEmitter::new();
    emitter.subscribe(LifecycleEvent::Configure, listener.clone());
    emitter.subscribe(LifecycleEvent::End, listener);

    emitter.emit_configure(&Configuration::new("tests")).await;
    emitter
        .emit_start(&mut Environment::new(watch_definition()))
        .await;
    let input = parse_input(&watch_definition(), "testwatch", &[]);
    let (_buffer, output) = buffered_output();
    emitter.emit_end(7, &input, &output).await.unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["configure tests", "end 7"]);
}

#[tokio::test]
async fn unsubscribing_from_end_makes_it_at_most_once() {
    let calls = Arc::new(StdMutex::new(Vec::new()));
    let listener = shared(Recorder {
        calls: calls.clone(),
        unsubscribe_on_end: true,
        ..Recorder::default()
    });

    let mut emitter = LifecycleEmitter::new();
    let subscription = emitter.subscribe(LifecycleEvent::End, listener);
    assert_eq!(emitter.listener_count(LifecycleEvent::End), 1);

    let input = parse_input(&watch_definition(), "testwatch", &[]);
    let (_buffer, output) = buffered_output();
    emitter.emit_end(0, &input, &output).await.unwrap();
    emitter.emit_end(1, &input, &output).await.unwrap();

    assert!(!subscription.is_active());
    assert_eq!(emitter.listener_count(LifecycleEvent::End), 0);
    assert_eq!(*calls.lock().unwrap(), vec!["end 0"]);
}

#[tokio::test]
async fn external_unsubscribe_stops_delivery() {
    let calls = Arc::new(StdMutex::new(Vec::new()));
    let listener = shared(Recorder {
        calls: calls.clone(),
        ..Recorder::default()
    });

    let mut emitter = LifecycleEmitter::new();
    let configure = emitter.subscribe(LifecycleEvent::Configure, listener.clone());
    emitter.subscribe(LifecycleEvent::Start, listener);

    configure.unsubscribe();
    emitter.emit_configure(&Configuration::new("tests")).await;
    emitter
        .emit_start(&mut Environment::new(watch_definition()))
        .await;

    assert_eq!(emitter.listener_count(LifecycleEvent::Configure), 0);
    assert_eq!(emitter.listener_count(LifecycleEvent::Start), 1);
    assert_eq!(*calls.lock().unwrap(), vec!["start"]);
}

#[tokio::test]
async fn end_error_stops_later_listeners() {
    let first_calls = Arc::new(StdMutex::new(Vec::new()));
    let second_calls = Arc::new(StdMutex::new(Vec::new()));

    let mut emitter = LifecycleEmitter::new();
    emitter.subscribe(
        LifecycleEvent::End,
        shared(Recorder {
            calls: first_calls.clone(),
            fail_on_end: true,
            ..Recorder::default()
        }),
    );
    emitter.subscribe(
        LifecycleEvent::End,
        shared(Recorder {
            calls: second_calls.clone(),
            ..Recorder::default()
        }),
    );

    let input = parse_input(&watch_definition(), "testwatch", &[]);
    let (_buffer, output) = buffered_output();
    let result = emitter.emit_end(1, &input, &output).await;

    assert!(matches!(result, Err(TestwatchError::ConfigError(_))));
    assert_eq!(*first_calls.lock().unwrap(), vec!["end 1"]);
    assert!(second_calls.lock().unwrap().is_empty());
}
