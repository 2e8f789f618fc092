//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions over JSON response bodies.

use account_service::models::REDACTION_MARKER;
use serde_json::Value;

/// Custom assertions for account service responses
///
/// # Example
/// ```rust,ignore
/// body.assert_success()
///     .assert_message("Welcome back, alice!")
///     .assert_no_credentials("pw123");
/// ```
pub trait ResponseAssertions {
    /// Assert that `status` is "success"
    fn assert_success(&self) -> &Self;

    /// Assert that `status` is "error"
    fn assert_error(&self) -> &Self;

    /// Assert the human-readable message
    fn assert_message(&self, expected: &str) -> &Self;

    /// Assert that neither the plaintext password nor any bcrypt hash appears anywhere
    fn assert_no_credentials(&self, plaintext: &str) -> &Self;

    /// Assert that every entry under `users` carries the redaction marker
    fn assert_users_redacted(&self) -> &Self;
}

impl ResponseAssertions for Value {
    fn assert_success(&self) -> &Self {
        assert_eq!(
            self["status"].as_str(),
            Some("success"),
            "Expected success response, got: {}",
            self
        );
        self
    }

    fn assert_error(&self) -> &Self {
        assert_eq!(
            self["status"].as_str(),
            Some("error"),
            "Expected error response, got: {}",
            self
        );
        self
    }

    fn assert_message(&self, expected: &str) -> &Self {
        assert_eq!(
            self["message"].as_str(),
            Some(expected),
            "Unexpected message in: {}",
            self
        );
        self
    }

    fn assert_no_credentials(&self, plaintext: &str) -> &Self {
        let rendered = self.to_string();
        assert!(
            !rendered.contains(&format!("\"{}\"", plaintext)),
            "Plaintext password leaked in: {}",
            rendered
        );
        assert!(
            !rendered.contains("$2b$"),
            "Credential hash leaked in: {}",
            rendered
        );
        self
    }

    fn assert_users_redacted(&self) -> &Self {
        let users = self["users"]
            .as_array()
            .unwrap_or_else(|| panic!("Response has no users array: {}", self));
        for user in users {
            assert_eq!(
                user["password"].as_str(),
                Some(REDACTION_MARKER),
                "User entry not redacted: {}",
                user
            );
        }
        self
    }
}
