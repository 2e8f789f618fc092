//! # Account Test Utilities
//!
//! Shared test utilities for the account service.
//!
//! This crate provides:
//! - Fixtures (fast hasher, fixed test accounts)
//! - Server test harness (TestAccountServer for E2E tests)
//! - Custom assertions (ResponseAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use account_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestAccountServer::spawn().await?;
//!     let body = server.signup(&ALICE).await?;
//!     body.assert_success().assert_message("Account created successfully! Welcome alice!");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod server_harness;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use server_harness::*;
