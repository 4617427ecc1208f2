//! The service template: one catch-all handler behind an axum listener.

mod server;

pub use server::{HelloServer, hello_router, shutdown_signal};
