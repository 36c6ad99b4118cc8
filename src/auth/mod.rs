pub mod authorizor;
mod credentials;
mod platform;
mod session;
mod user;

pub use credentials::{hash_password, Account, AuthConfig, CookieConfig, Credentials};
pub use platform::Platform;
pub use session::{Session, Sessions};
pub use user::{AuthStatus, User, ADMIN_ROLE};
