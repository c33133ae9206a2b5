//! Multicast events.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::listener::{Listener, ListenerList};

/// Multicast event carrying a delta time.
///
/// Cheap to clone; clones share the same subscriber list. Raising snapshots
/// the list and releases the lock before any listener runs, so listeners may
/// subscribe or unsubscribe on the event they are being called from:
///
/// - a listener added during a raise first runs on the next raise
/// - a listener removed during a raise still runs in the current one
///
/// [`Event::drain_raise`] walks the live list instead; see its docs.
#[derive(Clone, Default)]
pub struct Event {
    listeners: Arc<Mutex<ListenerList>>,
}

impl Event {
    /// Create an event with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event with room for `capacity` subscribers.
    ///
    /// The capacity is a hint only; subscriptions are never refused.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            listeners: Arc::new(Mutex::new(ListenerList::with_capacity(capacity))),
        }
    }

    /// Append a subscriber. The same listener may be added more than once.
    pub fn subscribe(&self, listener: Listener) {
        self.listeners.lock().push(listener);
    }

    /// Remove the first occurrence of `listener`. Absent listeners are ignored.
    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        self.listeners.lock().remove_first(listener)
    }

    /// Drop every subscriber.
    pub fn clear(&self) {
        self.listeners.lock().clear();
    }

    #[must_use]
    pub fn contains(&self, listener: &Listener) -> bool {
        self.listeners.lock().contains(listener)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }

    /// Invoke every subscriber in order. Returns how many were invoked.
    pub fn raise(&self, delta: f32) -> usize {
        let snapshot = self.listeners.lock().snapshot();
        invoke_all(&snapshot, delta)
    }

    /// Invoke every subscriber in order, then remove them all.
    ///
    /// The live list is walked one entry at a time with the lock released
    /// around each call, so listeners subscribed during the pass are reached
    /// in the same pass. A listener that always re-subscribes itself never
    /// lets the drain finish.
    pub fn drain_raise(&self, delta: f32) -> usize {
        let mut invoked = 0;
        loop {
            let next = {
                let mut listeners = self.listeners.lock();
                if let Some(listener) = listeners.get(invoked) {
                    listener.clone()
                } else {
                    listeners.clear();
                    return invoked;
                }
            };
            next.call(delta);
            invoked += 1;
        }
    }
}

fn invoke_all(listeners: &[Listener], delta: f32) -> usize {
    for listener in listeners {
        listener.call(delta);
    }
    listeners.len()
}

impl core::fmt::Debug for Event {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counter() -> (Arc<AtomicU32>, Listener) {
        let count = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&count);
        let listener = Listener::new(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, listener)
    }

    #[test]
    fn test_raise_empty_is_noop() {
        let event = Event::new();
        assert_eq!(event.raise(0.016), 0);
        assert_eq!(event.drain_raise(0.016), 0);
    }

    #[test]
    fn test_raise_in_insertion_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let event = Event::with_capacity(4);

        for id in 0..3 {
            let o = Arc::clone(&order);
            event.subscribe(Listener::new(move |_| o.lock().unwrap().push(id)));
        }

        assert_eq!(event.raise(0.016), 3);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_subscription_fires_twice() {
        let (count, listener) = counter();
        let event = Event::new();
        event.subscribe(listener.clone());
        event.subscribe(listener.clone());

        event.raise(0.016);
        assert_eq!(count.load(Ordering::SeqCst), 2);

        event.unsubscribe(&listener);
        event.raise(0.016);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let (count, listener) = counter();
        let event = Event::new();
        let alias = event.clone();

        alias.subscribe(listener);
        event.raise(0.016);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(event.len(), 1);
    }

    #[test]
    fn test_subscribe_during_raise_runs_next_time() {
        let event = Event::new();
        let (late_count, late) = counter();

        let e = event.clone();
        event.subscribe(Listener::new(move |_| {
            if !e.contains(&late) {
                e.subscribe(late.clone());
            }
        }));

        event.raise(0.016);
        assert_eq!(late_count.load(Ordering::SeqCst), 0);

        event.raise(0.016);
        assert_eq!(late_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_during_raise_still_runs_this_pass() {
        let event = Event::new();
        let (victim_count, victim) = counter();

        let e = event.clone();
        let v = victim.clone();
        event.subscribe(Listener::new(move |_| {
            e.unsubscribe(&v);
        }));
        event.subscribe(victim);

        event.raise(0.016);
        assert_eq!(victim_count.load(Ordering::SeqCst), 1);

        event.raise(0.016);
        assert_eq!(victim_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drain_raise_runs_once() {
        let (count, listener) = counter();
        let event = Event::new();
        event.subscribe(listener);

        assert_eq!(event.drain_raise(0.016), 1);
        assert_eq!(event.drain_raise(0.016), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(event.is_empty());
    }

    #[test]
    fn test_drain_raise_reaches_listeners_added_during_pass() {
        let event = Event::new();
        let (count, again) = counter();

        let e = event.clone();
        event.subscribe(Listener::new(move |_| e.subscribe(again.clone())));

        assert_eq!(event.drain_raise(0.016), 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(event.is_empty());

        assert_eq!(event.drain_raise(0.016), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drain_raise_unsubscribe_during_pass() {
        let event = Event::new();
        let (count, victim) = counter();

        let e = event.clone();
        let v = victim.clone();
        event.subscribe(Listener::new(move |_| {
            e.unsubscribe(&v);
        }));
        event.subscribe(victim);

        assert_eq!(event.drain_raise(0.016), 1);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(event.is_empty());
    }
}
