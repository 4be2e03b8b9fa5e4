mod credentials;
mod middleware;
mod password;

pub use credentials::Credentials;
pub use middleware::{AUTH_KEY_HEADER, AUTH_USER_HEADER, RequireAccount};
pub use password::PasswordHasher;
