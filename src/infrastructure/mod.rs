//! Infrastructure layer providing external service integrations.
//!
//! File exports are the only real external concern; everything else the
//! product talks to is simulated in the application layer.

pub mod export;

pub use export::*;
