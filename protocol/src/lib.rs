//! Messages exchanged with the hosting mini-app platform.
//!
//! The application only ever talks to the platform through [`PlatformBridge`],
//! so a page embedding, a native shell or a test double can all be supplied by
//! the caller.

pub use bridge::*;
pub use error::*;
pub use event::*;

mod bridge;
mod error;
mod event;
