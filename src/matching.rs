// 💞 Match Engine - Pair users who share an interest
// One strategy only: any common interest tag (exact, case-sensitive) → match

use crate::entities::{ProfileView, User};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// MATCH RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMatch {
    /// Position of the first user in the matched slice
    pub first_index: usize,

    /// Position of the second user (always > first_index)
    pub second_index: usize,

    pub first: ProfileView,
    pub second: ProfileView,

    /// Interests both users have, in the first user's order
    pub shared_interests: Vec<String>,
}

// ============================================================================
// MATCHING
// ============================================================================

/// Find every unordered pair of users with at least one interest in common.
///
/// Pairs come out ordered by the first position, then the second. A user is
/// never paired with itself but may appear in any number of pairs.
pub fn match_profiles(users: &[User]) -> Vec<ProfileMatch> {
    let mut matches = Vec::new();

    // Compare each user with every later user
    for i in 0..users.len() {
        for j in (i + 1)..users.len() {
            let first = &users[i];
            let second = &users[j];

            if !are_compatible(first, second) {
                continue;
            }

            matches.push(ProfileMatch {
                first_index: i,
                second_index: j,
                first: first.view(),
                second: second.view(),
                shared_interests: shared_interests(first, second),
            });
        }
    }

    debug!(users = users.len(), matches = matches.len(), "profiles matched");
    matches
}

/// Two users are compatible when their interest sets intersect
pub fn are_compatible(first: &User, second: &User) -> bool {
    first
        .interests
        .iter()
        .any(|interest| second.has_interest(interest))
}

fn shared_interests(first: &User, second: &User) -> Vec<String> {
    first
        .interests
        .iter()
        .filter(|interest| second.has_interest(interest))
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
