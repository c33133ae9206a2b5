//! Listener handles and ordered listener lists.

use std::sync::Arc;

/// Type-erased listener callback.
type ListenerFn = dyn Fn(f32) + Send + Sync;

/// A callback receiving the delta time, in seconds, of the phase it fires for.
///
/// Listeners compare by identity. Clones of one handle are equal; two handles
/// built separately are distinct even when wrapping the same function.
#[derive(Clone)]
pub struct Listener {
    callback: Arc<ListenerFn>,
}

impl Listener {
    /// Wrap a callback in a new listener identity.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the callback.
    #[inline]
    pub fn call(&self, delta: f32) {
        (self.callback)(delta);
    }

    /// Whether both handles refer to the same listener.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Arc::as_ptr(&self.callback), Arc::as_ptr(&other.callback))
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Listener {}

impl core::fmt::Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Listener")
            .field(&Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Ordered sequence of listeners. Insertion order is invocation order.
///
/// Duplicates are allowed; removal drops the first match only.
#[derive(Debug, Clone, Default)]
pub struct ListenerList {
    listeners: Vec<Listener>,
}

impl ListenerList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with room for `capacity` listeners.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            listeners: Vec::with_capacity(capacity),
        }
    }

    /// Append a listener.
    pub fn push(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Remove the first occurrence of `listener`. Returns whether one was found.
    pub fn remove_first(&mut self, listener: &Listener) -> bool {
        match self.listeners.iter().position(|l| l.ptr_eq(listener)) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `listener` occurs at least once.
    #[must_use]
    pub fn contains(&self, listener: &Listener) -> bool {
        self.listeners.iter().any(|l| l.ptr_eq(listener))
    }

    /// Drop every listener, keeping the allocation.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Copy the current listeners out, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Listener> {
        self.listeners.clone()
    }

    /// Listener at `index`, in invocation order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Listener> {
        self.listeners.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener> + '_ {
        self.listeners.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn noop(_: f32) {}

    #[test]
    fn test_clone_shares_identity() {
        let a = Listener::new(noop);
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_separate_listeners_are_distinct() {
        // Same function, two registrations: two identities.
        let a = Listener::new(noop);
        let b = Listener::new(noop);
        assert_ne!(a, b);
    }

    #[test]
    fn test_call_forwards_delta() {
        let total = Arc::new(AtomicU32::new(0));
        let t = Arc::clone(&total);
        let listener = Listener::new(move |delta| {
            t.fetch_add((delta * 1000.0) as u32, Ordering::SeqCst);
        });

        listener.call(0.5);
        listener.call(0.25);

        assert_eq!(total.load(Ordering::SeqCst), 750);
    }

    #[test]
    fn test_remove_first_only() {
        let a = Listener::new(noop);
        let b = Listener::new(noop);

        let mut list = ListenerList::new();
        list.push(a.clone());
        list.push(b.clone());
        list.push(a.clone());

        assert!(list.remove_first(&a));
        assert_eq!(list.len(), 2);
        assert!(list.contains(&a));

        let order = list.snapshot();
        assert_eq!(order[0], b);
        assert_eq!(order[1], a);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = ListenerList::new();
        list.push(Listener::new(noop));

        assert!(!list.remove_first(&Listener::new(noop)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_get_follows_insertion_order() {
        let a = Listener::new(noop);
        let b = Listener::new(noop);

        let mut list = ListenerList::with_capacity(8);
        list.push(a.clone());
        list.push(b.clone());

        assert_eq!(list.get(0), Some(&a));
        assert_eq!(list.get(1), Some(&b));
        assert_eq!(list.get(2), None);
    }
}
