//! Bearer token authentication against the identity provider.

pub mod bearer;
pub mod claims;
pub mod error;
pub mod jwks;
pub mod validator;

pub use bearer::extract_bearer;
pub use claims::AccessTokenClaims;
pub use error::AuthError;
pub use jwks::{HttpJwksSource, JwksCache, JwksSource};
pub use validator::{JwksTokenValidator, TokenValidator};
