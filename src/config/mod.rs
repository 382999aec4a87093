//! Configuration module for SiteBid
//!
//! - XDG-compliant path resolution
//! - User settings persistence (defaults for new projects, risk thresholds)

pub mod paths;
pub mod settings;

pub use paths::SiteBidPaths;
pub use settings::Settings;
