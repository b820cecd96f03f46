// Entity Models
// "Identity persists, values change"
//
// Each entity has:
// - Stable identity (UUID) that NEVER changes
// - Mutable profile values
// - Registry for lookups

pub mod user;

pub use user::{parse_age, parse_interests, ProfileUpdate, ProfileView, User, UserId, UserRegistry};
