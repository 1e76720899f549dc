//! Hand-off from capture threads to the render thread.
//!
//! Publishers push onto an unbounded channel and never block. The single
//! subscriber runs only inside [`EventBridge::pump`], which the owner calls
//! from the render thread once per frame. The boxed handler is not `Send`,
//! so the bridge cannot be moved off that thread.

use crate::input::KeyTransition;
use anyhow::bail;
use once_cell::sync::OnceCell;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

type Waker = Arc<dyn Fn() + Send + Sync>;
type Handler<T> = Box<dyn FnMut(&mut T, &KeyTransition)>;

/// Cloneable, thread-safe producer side of an [`EventBridge`].
#[derive(Clone)]
pub struct BridgePublisher {
    tx: Sender<KeyTransition>,
    waker: Arc<OnceCell<Waker>>,
}

impl BridgePublisher {
    /// Queue a transition. Returns `false` once the bridge has been dropped.
    pub fn publish(&self, id: &str, pressed: bool) -> bool {
        if self.tx.send(KeyTransition::new(id, pressed)).is_err() {
            return false;
        }
        if let Some(wake) = self.waker.get() {
            wake();
        }
        true
    }
}

pub struct EventBridge<T> {
    tx: Sender<KeyTransition>,
    rx: Receiver<KeyTransition>,
    waker: Arc<OnceCell<Waker>>,
    handler: Option<Handler<T>>,
}

impl<T> Default for EventBridge<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventBridge<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            waker: Arc::new(OnceCell::new()),
            handler: None,
        }
    }

    pub fn publisher(&self) -> BridgePublisher {
        BridgePublisher {
            tx: self.tx.clone(),
            waker: Arc::clone(&self.waker),
        }
    }

    /// Called after every publish so an idle render loop wakes up. Only the
    /// first waker is kept.
    pub fn set_waker(&self, wake: impl Fn() + Send + Sync + 'static) {
        if self.waker.set(Arc::new(wake)).is_err() {
            tracing::debug!("bridge waker already set");
        }
    }

    /// Register the render-thread handler. A bridge has exactly one.
    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&mut T, &KeyTransition) + 'static,
    ) -> anyhow::Result<()> {
        if self.handler.is_some() {
            bail!("event bridge already has a subscriber");
        }
        self.handler = Some(Box::new(handler));
        Ok(())
    }

    pub fn has_subscriber(&self) -> bool {
        self.handler.is_some()
    }

    /// Deliver every queued transition to the handler in publish order and
    /// return how many were delivered. Without a subscriber nothing is
    /// consumed.
    pub fn pump(&mut self, target: &mut T) -> usize {
        let Some(handler) = self.handler.as_mut() else {
            return 0;
        };
        let mut delivered = 0;
        loop {
            match self.rx.try_recv() {
                Ok(transition) => {
                    handler(target, &transition);
                    delivered += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if delivered > 0 {
            tracing::trace!(delivered, "bridge pumped");
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_subscriber_is_rejected() {
        let mut bridge: EventBridge<Vec<String>> = EventBridge::new();
        bridge.subscribe(|_, _| {}).expect("first subscribe");
        assert!(bridge.subscribe(|_, _| {}).is_err());
    }

    #[test]
    fn pump_without_subscriber_keeps_queue() {
        let mut bridge: EventBridge<Vec<String>> = EventBridge::new();
        bridge.publisher().publish("a", true);
        let mut seen = Vec::new();
        assert_eq!(bridge.pump(&mut seen), 0);
        bridge
            .subscribe(|seen: &mut Vec<String>, t| seen.push(t.id.clone()))
            .expect("subscribe");
        assert_eq!(bridge.pump(&mut seen), 1);
        assert_eq!(seen, vec!["a".to_string()]);
    }

    #[test]
    fn waker_runs_on_publish() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let bridge: EventBridge<()> = EventBridge::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        bridge.set_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let publisher = bridge.publisher();
        publisher.publish("a", true);
        publisher.publish("a", false);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn publish_after_drop_reports_failure() {
        let bridge: EventBridge<()> = EventBridge::new();
        let publisher = bridge.publisher();
        drop(bridge);
        assert!(!publisher.publish("a", true));
    }
}
