//! Fixed test data and fast collaborators.
//!
//! All fixture values are constants so failures reproduce exactly.

use account_service::config::MIN_BCRYPT_COST;
use account_service::crypto::BcryptHasher;
use std::sync::Arc;

/// Credentials for a test account.
#[derive(Debug, Clone, Copy)]
pub struct TestAccount {
    pub username: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

pub const ALICE: TestAccount = TestAccount {
    username: "alice",
    email: "a@x.com",
    password: "pw123",
};

pub const BOB: TestAccount = TestAccount {
    username: "bob",
    email: "bob@example.com",
    password: "correct-horse-battery-staple",
};

pub const CHARLIE: TestAccount = TestAccount {
    username: "charlie",
    email: "charlie@example.com",
    password: "charlie-pw",
};

/// Email that no fixture registers.
pub const UNKNOWN_EMAIL: &str = "nobody@example.com";

/// Hasher at the lowest accepted cost, to keep signup-heavy tests quick.
pub fn test_hasher() -> Arc<BcryptHasher> {
    match BcryptHasher::new(MIN_BCRYPT_COST) {
        Ok(hasher) => Arc::new(hasher),
        Err(e) => panic!("minimum bcrypt cost must be accepted: {e}"),
    }
}
