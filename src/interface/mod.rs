pub mod board_api_trait;
pub mod clock_trait;
pub mod peer_notifier_trait;
pub mod render_trait;

pub use board_api_trait::BoardApi;
pub use clock_trait::{ClockPort, SystemClock};
pub use peer_notifier_trait::{PeerEvent, PeerEventKind, PeerNotifier};
pub use render_trait::{RenderInstruction, RenderPort, UserNotice};
