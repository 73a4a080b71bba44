//! NSG Scope console: the terminal application around the GPS overlay.
//!
//! Screens are driven by [`session::Session`]; periodic UI timers are
//! [`ticker::Ticker`]s owned by the view that needs them.

pub mod config;
pub mod console;
pub mod error;
pub mod feed;
pub mod map_widget;
pub mod palette;
pub mod roster_view;
pub mod session;
pub mod ticker;
pub mod vitals;

pub use config::ConsoleConfig;
pub use error::ConsoleError;
pub use session::{Screen, Session};
