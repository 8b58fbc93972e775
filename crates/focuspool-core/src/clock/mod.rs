mod engine;
mod session;
mod time;

pub use engine::{ClockState, SessionClock};
pub use session::{Category, Session, SessionMode, Subject};
pub use time::{SystemClock, TimeHandle, TimeSource};

#[cfg(test)]
pub(crate) use time::test_support;
