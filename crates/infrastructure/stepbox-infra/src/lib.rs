pub mod clock;
pub mod net;

// Re-exports for convenience
pub use clock::SystemClock;
pub use net::{open_file_url, HttpHostOpener, URI_COMPONENT};
