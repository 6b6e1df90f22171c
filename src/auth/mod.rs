mod middleware;
mod password;
mod session;

pub use middleware::{
    SESSION_COOKIE_NAME, SessionToken, is_public_path, removal_cookie, require_session,
    session_cookie, session_token,
};
pub use password::{ADMIN_PASSWORD_ENV, AdminPassword};
pub use session::SessionStore;
