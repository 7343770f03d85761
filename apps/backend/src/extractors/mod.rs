pub mod auth_claims;
pub mod validated_form;

pub use auth_claims::AuthClaims;
pub use validated_form::ValidatedForm;
