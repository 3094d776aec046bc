//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod display_ticker;

// Re-export main functions
pub use display_ticker::display_ticker_task;
