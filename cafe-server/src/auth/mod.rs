//! Authentication and authorization
//!
//! - [`IdentityProvider`] - account creation, sign-in, token verification
//! - [`JwtService`] - access token issuing and validation
//! - [`CurrentUser`] - caller context
//! - [`require_auth`] / [`require_admin`] - middleware

pub mod extractor;
pub mod identity;
pub mod jwt;
pub mod middleware;

pub use extractor::CurrentUser;
pub use identity::{
    Identity, IdentityError, IdentityMetadata, IdentityProvider, LocalIdentityProvider, Session,
};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
