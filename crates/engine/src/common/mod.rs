//! Common definitions shared by every component of the engine.

/// Error taxonomy for configuration validation and derivation.
pub mod error;
