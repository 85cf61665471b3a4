//! Progress events for Recheck.
//!
//! An in-process [`EventBus`] fans progress events out to filtered
//! subscribers, and a [`ProgressListener`] consumes one subscription on a
//! background thread. Shutdown is explicit and deterministic: closing the
//! bus ends every stream, and joining the listener blocks until its thread
//! has actually exited.
//!
//! # Shutdown protocol
//!
//! ```no_run
//! use recheck_events::{console_sink, EventBus, EventFilter, ProgressListener};
//!
//! let bus = EventBus::new();
//! let listener = ProgressListener::spawn(bus.subscribe(EventFilter::default()), console_sink);
//! // ... emit events ...
//! bus.shutdown();
//! let received = listener.join();
//! ```

pub mod bus;
pub mod event;
pub mod listener;

pub use bus::{EventBus, EventFilter, EventStream};
pub use event::{ProgressEvent, ProgressState};
pub use listener::{console_sink, ProgressListener};
