//! NSG Scope model - core types shared by the overlay renderer and the console.
//!
//! Troops and targets are georeferenced entities refreshed wholesale by a
//! roster source (the built-in mock roster or a JSON file). Nothing here
//! mutates an entity in place.

pub mod constants;
pub mod error;
pub mod operator;
pub mod roster;
pub mod types;

pub use constants::*;
pub use error::*;
pub use operator::{operator_for_username, Operator};
pub use roster::Roster;
pub use types::*;
