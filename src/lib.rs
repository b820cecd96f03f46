// BrayMatch - Core Library
// In-memory user directory, interest matching, and the menu console over them

pub mod error;
pub mod entities;
pub mod matching;
pub mod config;
pub mod telemetry;
pub mod console;

// Re-export commonly used types
pub use error::{DirectoryError, DirectoryResult};
pub use entities::{
    parse_age, parse_interests,
    ProfileUpdate, ProfileView, User, UserId, UserRegistry,
};
pub use matching::{are_compatible, match_profiles, ProfileMatch};
pub use config::{Config, LogFormat};
pub use console::{Console, MenuChoice};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
