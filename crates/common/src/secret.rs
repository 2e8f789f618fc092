//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports the [`secrecy`] types used for plaintext passwords and
//! connection strings. `SecretString` redacts itself in `Debug`, so request
//! structs that derive `Debug` stay safe to log, and the value is zeroized on
//! drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct LoginRequest {
//!     email: String,
//!     password: SecretString,
//! }
//!
//! let req = LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: SecretString::from("hunter2"),
//! };
//!
//! assert!(!format!("{req:?}").contains("hunter2"));
//! assert_eq!(req.password.expose_secret(), "hunter2");
//! ```
//!
//! With the `serde` feature enabled on `secrecy`, `SecretString` fields
//! deserialize directly from JSON request bodies.

pub use secrecy::{ExposeSecret, SecretString};
