//! Library half of the swipe demo: the listing deck, the ledger the swipe
//! callbacks fill, and a small shell that drives a `CardStack` frame by frame.

pub mod ledger;
pub mod listing;
pub mod session;
pub mod shell;

pub use ledger::SwipeLedger;
pub use listing::{sample_listings, Listing};
pub use session::{run_scripted_session, SessionReport};
pub use shell::{DemoShell, FrameSource, FRAME_INTERVAL};
