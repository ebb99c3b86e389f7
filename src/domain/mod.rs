pub mod errors;
pub mod form;
pub mod models;
pub mod schedule;

pub use errors::*;
pub use form::*;
pub use models::*;
pub use schedule::*;
