//! Launch history and resolution cache
//!
//! Remembers which coordinates were launched, what they resolved to and
//! when. Callers record an entry after each successful resolution and
//! consult the store before resolving again.
//!
//! # Lifecycle
//!
//! | Event | Effect |
//! |-------|--------|
//! | `record_entry` | entry moves to the front, stamped with the current time |
//! | size bound exceeded | oldest entries evicted from the tail |
//! | expiry window passed | `search` misses, entry still listed |
//! | `clear_cache` | memory and file emptied |

pub mod clock;
pub mod entry;
pub mod persist;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::HistoryEntry;
pub use store::{HistoryStore, PersistMode, StoreOptions};
