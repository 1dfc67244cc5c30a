//! Pure decoration steps applied to fetched posts.
//!
//! The service applies these in a fixed order: populate author -> redact
//! author -> format timestamp -> render content -> count comments.
//! Redaction must see the full author document, and rendering must see
//! raw markdown, so the order is not negotiable.

use chrono::{DateTime, Utc};

use crate::domain::{AuthorProfile, User};

/// Reduce a full user document to its public-safe subset.
pub fn redact_author(user: &User) -> AuthorProfile {
    AuthorProfile {
        id: user.id,
        name: user.name.clone(),
        gender: user.gender.clone(),
        bio: user.bio.clone(),
        avatar: user.avatar.clone(),
    }
}

/// Human-readable creation timestamp, `YYYY-MM-DD HH:MM`.
pub fn format_created_at(created_at: &DateTime<Utc>) -> String {
    created_at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn redaction_keeps_only_the_public_whitelist() {
        let mut user = User::new(
            "ada@example.com".to_string(),
            "$argon2id$secret".to_string(),
            "Ada".to_string(),
        );
        user.bio = "mathematician".to_string();

        let profile = redact_author(&user);
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.name, "Ada");

        // Serialized form must expose exactly the whitelisted fields.
        let json = serde_json::to_value(&profile).unwrap();
        let mut keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["avatar", "bio", "gender", "id", "name"]);
    }

    #[test]
    fn created_at_formats_to_minute_precision() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 17, 5, 42).unwrap();
        assert_eq!(format_created_at(&ts), "2024-03-09 17:05");
    }
}
