//! Session lifecycle over an externalized cookie store.
//!
//! The session gate turns token verification into a boolean authentication
//! predicate and manages the cookie envelope. Cookie storage itself is a
//! trait so the web framework's jar (or a test double) can be plugged in.

mod cookie;
mod gate;

pub use cookie::{CookieAttributes, CookieStore, MemoryCookieStore, SameSite};
pub use gate::SessionGate;
