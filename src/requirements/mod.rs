//! External tool requirements: probing and installation.

pub mod installer;
pub mod probe;
pub mod tool;

pub use installer::{InstallOutcome, Installer};
pub use probe::{is_installed, listing_mentions};
pub use tool::DotnetTool;
