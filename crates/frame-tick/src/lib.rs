//! Frame Tick
//!
//! Per-frame phase dispatch for game loops.
//!
//! # Layers
//!
//! - [`FrameDispatcher`] is driven by the host through [`FrameHooks`] and
//!   re-exposes the host callbacks as four phase events (see [`Dispatcher`]).
//! - [`TickHandler`] subscribes to a dispatcher and fans each phase out to a
//!   passthrough [`Event`] and an ordered listener registry, with one-shot
//!   registration on late-update.
//! - [`ManualTickSource`] pumps a dispatcher by hand where no engine exists.
//!
//! # Example
//!
//! ```
//! use frame_tick::prelude::*;
//!
//! let dispatcher = FrameDispatcher::new();
//! let handler = TickHandler::new(dispatcher.clone());
//!
//! handler.subscribe_on_frame_update(Listener::new(|dt| assert!(dt > 0.0)));
//! handler.subscribe_on_late_update_once(Listener::new(|_| {}));
//!
//! let mut source = ManualTickSource::new(dispatcher);
//! source.step();
//! assert_eq!(handler.once_count(), 0);
//! ```
//!
//! Everything runs synchronously on the thread that calls the host hooks.
//! A panicking listener unwinds to that caller and later listeners of the same
//! firing are skipped.

mod dispatcher;
mod event;
mod handler;
mod listener;
mod manual;
mod phase;

pub use dispatcher::{Dispatcher, FrameDispatcher, FrameHooks};
pub use event::Event;
pub use handler::{DEFAULT_LISTENER_CAPACITY, TickHandler};
pub use listener::{Listener, ListenerList};
pub use manual::ManualTickSource;
pub use phase::Phase;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Dispatcher, Event, FrameDispatcher, FrameHooks, Listener, ManualTickSource, Phase,
        TickHandler,
    };
}
