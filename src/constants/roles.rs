//! Role names carried in the `role` claim of access tokens.

/// Role allowed to mutate the catalogue and, depending on policy, to read it.
pub const ROLE_ADMIN: &str = "Administrator";
