//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod generation_logger;
pub mod session_observer;
pub mod text_generator;
