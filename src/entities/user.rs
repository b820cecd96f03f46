// 👤 User Entity - Stable identity + mutable profile
//
// "The user id is IDENTITY (never changes), name/age/gender/interests are VALUES"
//
// - UUID assigned at creation, never reused, never edited
// - Profile values replaced field by field through ProfileUpdate
// - Registry keeps users in insertion order and owns them exclusively

use crate::error::{DirectoryError, DirectoryResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

// ============================================================================
// USER ID
// ============================================================================

/// Identifier of a user. Shown to and accepted from the operator in its
/// hyphenated string form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// USER ENTITY
// ============================================================================

/// One user's stored profile.
///
/// Identity: `id` (private, read through [`User::id`])
/// Values: name, age, gender, interests (replaced via [`ProfileUpdate`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,

    pub name: String,
    pub age: u32,
    pub gender: String,

    /// Interest tags. Order is entry order and only matters for display;
    /// duplicates are collapsed on write.
    pub interests: Vec<String>,

    // ========================================================================
    // BOOKKEEPING (never used for matching)
    // ========================================================================
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(name: String, age: u32, gender: String, interests: Vec<String>) -> Self {
        let now = Utc::now();

        User {
            id: UserId::new(),
            name,
            age,
            gender,
            interests: dedup_interests(interests),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// Whether `interest` is one of this user's tags (exact, case-sensitive)
    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests.iter().any(|i| i == interest)
    }

    /// Apply the present fields of `update`.
    ///
    /// Returns true when at least one value actually changed; only then are
    /// `version` and `updated_at` advanced.
    pub fn apply(&mut self, update: ProfileUpdate) -> bool {
        let mut changed = false;

        if let Some(name) = update.name {
            changed |= name != self.name;
            self.name = name;
        }
        if let Some(age) = update.age {
            changed |= age != self.age;
            self.age = age;
        }
        if let Some(gender) = update.gender {
            changed |= gender != self.gender;
            self.gender = gender;
        }
        if let Some(interests) = update.interests {
            let interests = dedup_interests(interests);
            changed |= interests != self.interests;
            self.interests = interests;
        }

        if changed {
            self.version += 1;
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Snapshot for display
    pub fn view(&self) -> ProfileView {
        ProfileView {
            user_id: self.id.to_string(),
            name: self.name.clone(),
            age: self.age,
            gender: self.gender.clone(),
            interests: self.interests.clone(),
        }
    }
}

// ============================================================================
// PROFILE VIEW + UPDATE
// ============================================================================

/// What the console prints for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub user_id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub interests: Vec<String>,
}

impl ProfileView {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Partial profile change. `None` leaves the field alone; `Some` replaces it,
/// including with an empty string or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub interests: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.interests.is_none()
    }
}

// ============================================================================
// USER REGISTRY
// ============================================================================

/// In-memory directory of users, in insertion order.
///
/// Lookups are linear scans over the string form of the identifier.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl UserRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        UserRegistry { users: Vec::new() }
    }

    /// Create registry with a few sample profiles pre-loaded
    pub fn with_demo_profiles() -> Self {
        let mut registry = UserRegistry::new();
        registry.register_demo_profiles();
        registry
    }

    fn register_demo_profiles(&mut self) {
        let samples: [(&str, u32, &str, &[&str]); 4] = [
            ("Alice", 29, "female", &["hiking", "jazz"]),
            ("Bruno", 34, "male", &["jazz", "cooking"]),
            ("Chen", 41, "male", &["chess"]),
            ("Dana", 26, "female", &["cooking", "hiking"]),
        ];

        for (name, age, gender, interests) in samples {
            self.create(
                name.to_string(),
                age,
                gender.to_string(),
                interests.iter().map(|i| i.to_string()).collect(),
            );
        }
    }

    /// Store a new user and return its identifier. Never fails.
    pub fn create(
        &mut self,
        name: String,
        age: u32,
        gender: String,
        interests: Vec<String>,
    ) -> UserId {
        let user = User::new(name, age, gender, interests);
        let id = user.id();
        info!(user_id = %id, name = %user.name, "user created");
        self.users.push(user);
        id
    }

    /// Apply `update` to the user with the given identifier.
    ///
    /// An unknown identifier leaves the registry untouched.
    pub fn update(&mut self, id: &str, update: ProfileUpdate) -> DirectoryResult<&User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id.to_string() == id)
            .ok_or_else(|| DirectoryError::not_found(id))?;

        let changed = user.apply(update);
        info!(user_id = %id, changed, version = user.version, "user updated");
        Ok(&*user)
    }

    /// Remove and return the user with the given identifier
    pub fn delete(&mut self, id: &str) -> DirectoryResult<User> {
        let index = self
            .users
            .iter()
            .position(|u| u.id.to_string() == id)
            .ok_or_else(|| DirectoryError::not_found(id))?;

        let removed = self.users.remove(index);
        info!(user_id = %id, remaining = self.users.len(), "user deleted");
        Ok(removed)
    }

    /// Find user by the string form of its identifier
    pub fn find(&self, id: &str) -> Option<&User> {
        let found = self.users.iter().find(|u| u.id.to_string() == id);
        debug!(user_id = %id, found = found.is_some(), "user lookup");
        found
    }

    /// Snapshot of all users in insertion order
    pub fn list_all(&self) -> Vec<User> {
        self.users.clone()
    }

    /// Borrowed view of all users in insertion order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Parse an age typed by the operator.
///
/// Surrounding whitespace is ignored; anything else that is not a
/// non-negative whole number is rejected.
pub fn parse_age(raw: &str) -> DirectoryResult<u32> {
    raw.trim().parse::<u32>().map_err(|_| {
        DirectoryError::invalid_input(format!(
            "age must be a non-negative whole number, got {:?}",
            raw.trim()
        ))
    })
}

/// Split a comma-separated interest line.
///
/// Segments are kept verbatim (no trimming, no case folding); empty
/// segments are dropped and repeats collapsed.
pub fn parse_interests(raw: &str) -> Vec<String> {
    dedup_interests(
        raw.split(',')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn dedup_interests(interests: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(interests.len());
    for interest in interests {
        if !unique.contains(&interest) {
            unique.push(interest);
        }
    }
    unique
}

// ============================================================================
// TESTS
// ============================================================================
