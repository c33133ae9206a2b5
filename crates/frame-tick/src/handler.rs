//! Tick handler: application-facing listener registries on top of a dispatcher.
//!
//! # Firing order
//!
//! For every dispatcher phase the handler first raises its passthrough event,
//! then walks the phase registry in insertion order. Late-update additionally
//! drains the once-registry:
//!
//! ```text
//! OnUpdate       ─► FrameUpdate      ─► update listeners
//! OnLateUpdate   ─► FrameLateUpdate  ─► late-update listeners ─► once listeners (drained)
//! OnFixedUpdate  ─► PhysicUpdate     ─► physics listeners
//! OnEndFrame     ─► EndFrameUpdate   ─► end-of-frame listeners
//! ```

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::{Dispatcher, Event, FrameDispatcher, Listener, Phase};

/// Listener capacity used by [`TickHandler::new`].
pub const DEFAULT_LISTENER_CAPACITY: usize = 50;

/// State shared between the handler and its dispatcher bindings.
struct HandlerState {
    /// Passthrough events, indexed by [`Phase::index`].
    events: [Event; 4],
    /// Registered listeners, indexed by [`Phase::index`].
    registries: [Event; 4],
    late_update_once: Event,
}

impl HandlerState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Default::default(),
            registries: core::array::from_fn(|_| Event::with_capacity(capacity)),
            late_update_once: Event::with_capacity(capacity),
        }
    }

    fn dispatch(&self, phase: Phase, delta: f32) {
        self.events[phase.index()].raise(delta);
        let invoked = self.registries[phase.index()].raise(delta);

        let once = if phase == Phase::LateUpdate {
            self.late_update_once.drain_raise(delta)
        } else {
            0
        };

        trace!(%phase, delta, invoked, once, "tick handler fan-out");
    }

    fn clear(&self) {
        for event in self.events.iter().chain(&self.registries) {
            event.clear();
        }
        self.late_update_once.clear();
    }
}

/// Fans dispatcher phases out to per-phase listener registries.
///
/// Construction subscribes the handler to all four dispatcher phases;
/// [`TickHandler::dispose`] (or dropping the handler) detaches it again. The
/// dispatcher itself is never disposed by the handler.
pub struct TickHandler<D: Dispatcher = FrameDispatcher> {
    dispatcher: D,
    state: Arc<HandlerState>,
    /// Listeners subscribed on the dispatcher, in [`Phase::ALL`] order.
    bindings: [(Phase, Listener); 4],
    disposed: AtomicBool,
}

impl<D: Dispatcher> TickHandler<D> {
    /// Attach to `dispatcher` with [`DEFAULT_LISTENER_CAPACITY`].
    pub fn new(dispatcher: D) -> Self {
        Self::with_capacity(dispatcher, DEFAULT_LISTENER_CAPACITY)
    }

    /// Attach to `dispatcher`, pre-sizing each registry for `capacity` listeners.
    ///
    /// The capacity is a hint; registries grow without bound.
    pub fn with_capacity(dispatcher: D, capacity: usize) -> Self {
        let state = Arc::new(HandlerState::with_capacity(capacity));

        let bindings = Phase::ALL.map(|phase| {
            let state = Arc::clone(&state);
            let listener = Listener::new(move |delta| state.dispatch(phase, delta));
            (phase, listener)
        });

        for (phase, listener) in &bindings {
            dispatcher.subscribe(*phase, listener.clone());
        }

        debug!(capacity, "tick handler attached");

        Self {
            dispatcher,
            state,
            bindings,
            disposed: AtomicBool::new(false),
        }
    }

    /// The dispatcher this handler listens to.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Most recent frame delta seen by the dispatcher.
    pub fn delta_time(&self) -> f32 {
        self.dispatcher.delta_time()
    }

    // ==================== Passthrough events ====================

    /// Passthrough event for `phase`, raised before the phase registry.
    pub fn event(&self, phase: Phase) -> &Event {
        &self.state.events[phase.index()]
    }

    pub fn frame_update(&self) -> &Event {
        self.event(Phase::Update)
    }

    pub fn frame_late_update(&self) -> &Event {
        self.event(Phase::LateUpdate)
    }

    pub fn end_frame_update(&self) -> &Event {
        self.event(Phase::EndOfFrame)
    }

    pub fn physic_update(&self) -> &Event {
        self.event(Phase::FixedUpdate)
    }

    // ==================== Registries ====================

    /// Append `listener` to the registry of `phase`. Duplicates are kept.
    pub fn subscribe(&self, phase: Phase, listener: Listener) {
        self.state.registries[phase.index()].subscribe(listener);
    }

    /// Remove the first occurrence of `listener` from the registry of `phase`.
    pub fn unsubscribe(&self, phase: Phase, listener: &Listener) -> bool {
        self.state.registries[phase.index()].unsubscribe(listener)
    }

    pub fn subscribe_on_frame_update(&self, listener: Listener) {
        self.subscribe(Phase::Update, listener);
    }

    pub fn subscribe_on_frame_late_update(&self, listener: Listener) {
        self.subscribe(Phase::LateUpdate, listener);
    }

    pub fn subscribe_on_physic_update(&self, listener: Listener) {
        self.subscribe(Phase::FixedUpdate, listener);
    }

    pub fn subscribe_on_end_frame_update(&self, listener: Listener) {
        self.subscribe(Phase::EndOfFrame, listener);
    }

    pub fn unsubscribe_on_frame_update(&self, listener: &Listener) -> bool {
        self.unsubscribe(Phase::Update, listener)
    }

    pub fn unsubscribe_on_frame_late_update(&self, listener: &Listener) -> bool {
        self.unsubscribe(Phase::LateUpdate, listener)
    }

    pub fn unsubscribe_on_physic_update(&self, listener: &Listener) -> bool {
        self.unsubscribe(Phase::FixedUpdate, listener)
    }

    pub fn unsubscribe_on_end_frame_update(&self, listener: &Listener) -> bool {
        self.unsubscribe(Phase::EndOfFrame, listener)
    }

    /// Run `listener` on the next late-update only.
    ///
    /// A once-listener registered while the once-registry is being drained
    /// still runs in that same late-update, then is cleared with the rest.
    pub fn subscribe_on_late_update_once(&self, listener: Listener) {
        self.state.late_update_once.subscribe(listener);
    }

    /// Number of listeners in the registry of `phase`.
    pub fn listener_count(&self, phase: Phase) -> usize {
        self.state.registries[phase.index()].len()
    }

    /// Number of pending once-listeners.
    pub fn once_count(&self) -> usize {
        self.state.late_update_once.len()
    }

    // ==================== Lifecycle ====================

    /// Detach from the dispatcher and clear every registry.
    ///
    /// Repeated calls do nothing. The dispatcher stays alive and keeps serving
    /// its other subscribers.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        for (phase, listener) in &self.bindings {
            self.dispatcher.unsubscribe(*phase, listener);
        }
        self.state.clear();

        debug!("tick handler disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl<D: Dispatcher> Drop for TickHandler<D> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<D: Dispatcher> core::fmt::Debug for TickHandler<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("TickHandler");
        for phase in Phase::ALL {
            s.field(phase.name(), &self.listener_count(phase));
        }
        s.field("once", &self.once_count())
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}
