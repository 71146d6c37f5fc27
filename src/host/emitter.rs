// src/host/emitter.rs

//! Lifecycle event delivery.
//!
//! The host owns a [`LifecycleEmitter`] with one slot list per
//! [`LifecycleEvent`]. Listeners subscribe per event and get a
//! [`Subscription`] back; the same handle is passed to `on_end` so a
//! listener can drop itself from the bus while it is being called.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::Result;
use crate::host::{Configuration, Environment, Input, SharedOutput};
use crate::types::BoxFuture;

/// Named points in the host's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Configuration loaded.
    Configure,
    /// Run starting; options may still be registered.
    Start,
    /// Run finished.
    End,
}

/// Receiver of lifecycle events. Every handler defaults to a no-op.
pub trait LifecycleListener: Send {
    fn on_configure(&mut self, _configuration: &Configuration) {}

    fn on_start(&mut self, _environment: &mut Environment) {}

    fn on_end<'a>(
        &'a mut self,
        _subscription: &'a Subscription,
        _exit_code: i32,
        _input: &'a Input,
        _output: &'a SharedOutput,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async { Ok(()) })
    }
}

pub type SharedListener = Arc<Mutex<dyn LifecycleListener>>;

/// Handle to one slot on the emitter.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    event: LifecycleEvent,
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn event(&self) -> LifecycleEvent {
        self.event
    }

    /// Stop receiving this event. Takes effect for the next emission,
    /// including one already in progress for later slots.
    pub fn unsubscribe(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

struct Slot {
    subscription: Subscription,
    listener: SharedListener,
}

#[derive(Default)]
pub struct LifecycleEmitter {
    slots: Vec<Slot>,
    next_id: u64,
}

impl std::fmt::Debug for LifecycleEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleEmitter")
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl LifecycleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, event: LifecycleEvent, listener: SharedListener) -> Subscription {
        let subscription = Subscription {
            id: self.next_id,
            event,
            active: Arc::new(AtomicBool::new(true)),
        };
        self.next_id += 1;
        self.slots.push(Slot {
            subscription: subscription.clone(),
            listener,
        });
        subscription
    }

    /// Number of active listeners for `event`.
    pub fn listener_count(&self, event: LifecycleEvent) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.subscription.event == event && slot.subscription.is_active())
            .count()
    }

    pub async fn emit_configure(&mut self, configuration: &Configuration) {
        for (_, listener) in self.active(LifecycleEvent::Configure) {
            listener.lock().await.on_configure(configuration);
        }
    }

    pub async fn emit_start(&mut self, environment: &mut Environment) {
        for (_, listener) in self.active(LifecycleEvent::Start) {
            listener.lock().await.on_start(environment);
        }
    }

    /// Deliver `end` to each active listener in subscription order.
    ///
    /// Stops at the first listener error and returns it.
    pub async fn emit_end(
        &mut self,
        exit_code: i32,
        input: &Input,
        output: &SharedOutput,
    ) -> Result<()> {
        for (subscription, listener) in self.active(LifecycleEvent::End) {
            if !subscription.is_active() {
                continue;
            }
            listener
                .lock()
                .await
                .on_end(&subscription, exit_code, input, output)
                .await?;
        }
        Ok(())
    }

    /// Drop unsubscribed slots and snapshot the active ones for `event`.
    fn active(&mut self, event: LifecycleEvent) -> Vec<(Subscription, SharedListener)> {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.subscription.is_active());
        if self.slots.len() != before {
            debug!(removed = before - self.slots.len(), "pruned lifecycle subscriptions");
        }

        self.slots
            .iter()
            .filter(|slot| slot.subscription.event == event)
            .map(|slot| (slot.subscription.clone(), Arc::clone(&slot.listener)))
            .collect()
    }
}
