//! # Sunbar Library
//!
//! Library behind the sunbar menu-bar plugin, split out of the binary so the
//! pieces can be tested on their own.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Sunbar` runs one status computation with injectable clock,
//!   network and appearance switch
//! - **Data**: `cache` keeps today's astronomy response on disk, `astronomy`
//!   fetches and decodes it, `geo` resolves the location
//! - **Logic**: `events` decides which event is next, `format` and `status`
//!   produce the text the menu-bar host reads
//! - **Infrastructure**: configuration, errors and exit codes, logging, time

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod appearance;
pub mod astronomy;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod geo;
pub mod http;
pub mod status;
pub mod time_source;

mod sunbar;

pub use error::SunbarError;
pub use sunbar::Sunbar;
