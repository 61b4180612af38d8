pub mod auth;
pub mod response;

pub use auth::permission_guard;
pub use response::method_not_allowed_envelope;
