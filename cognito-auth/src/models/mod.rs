//! Database models
//!
//! Flat records written after a successful sign-in:
//! - [`User`]: one row per email
//! - [`UserToken`]: the user's current tokens, overwritten on re-authentication
//! - [`LoginHistory`]: append-only sign-in log
//!
//! The tables are created by the embedded migrations (see [`crate::database`]).

mod login_history;
mod token;
mod user;

pub use login_history::LoginHistory;
pub use token::UserToken;
pub use user::User;
