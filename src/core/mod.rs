pub mod controller;
pub mod expiry;
pub mod history;
pub mod session;
pub mod sync_state;

pub use controller::SyncController;
pub use expiry::{Countdown, ExpiryClock};
pub use history::BoundedHistoryStore;
pub use session::{BoardName, Language, SessionContext};
pub use sync_state::SyncPhase;
