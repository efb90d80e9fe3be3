// Server module entry
// Listener setup, connection serving and graceful shutdown

pub mod connection;
pub mod listener;
pub mod server_loop;
pub mod signal;

// Re-export commonly used items
pub use listener::create_reusable_listener;
pub use server_loop::serve;
pub use signal::{start_signal_handler, Shutdown};
