//! MLOC - Mini Line of Credit terminal client
//!
//! A terminal mockup of a consumer line-of-credit product: a customer
//! portal (balances, draws, payment history, documents) and a
//! multi-step loan-application wizard. Backend calls are simulated.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
