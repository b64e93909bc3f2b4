//! Route modules, one per deployable service.

pub mod extract;
pub mod health;
pub mod scrape;
pub mod summarise;
pub mod whatson;
