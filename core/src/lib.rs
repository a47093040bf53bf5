//! Core components for signing Ceph RGW and S3 API requests.
//!
//! This crate provides the foundational types and traits shared by the
//! rgwsign service crates.
//!
//! ## Overview
//!
//! - **Traits**: [`ProvideCredential`] hands a credential to the signer,
//!   [`SignRequest`] signs an `http::request::Parts` in place and
//!   [`SigningCredential`] tells whether a credential can still be used.
//! - **Signer**: [`Signer`] caches the credential and drives signing.
//! - **Env**: [`Env`] abstracts environment lookups for configuration.
//!
//! ## Example
//!
//! ```
//! use rgwsign_core::{ProvideCredential, Result, SignRequest, Signer, SigningCredential};
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyCredential;
//!
//!     fn provide_credential(&self) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             token: "my-token".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     fn sign_request(
//!         &self,
//!         req: &mut http::request::Parts,
//!         credential: Option<&Self::Credential>,
//!     ) -> Result<()> {
//!         if let Some(cred) = credential {
//!             req.headers
//!                 .insert(http::header::AUTHORIZATION, cred.token.parse()?);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let signer = Signer::new(MyProvider, MySigner);
//!
//! let mut parts = http::Request::get("http://127.0.0.1:7480/admin/user")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts)?;
//! assert_eq!(parts.headers["authorization"], "my-token");
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC-SHA1 and base64 helpers
//! - [`time`]: Clock and http date helpers
//! - [`utils`]: Redaction of secrets in debug output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::{Env, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod signer;
pub use signer::Signer;
