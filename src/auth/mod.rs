pub mod client;
pub mod cookies;

pub use client::{IdentityClient, TokenPair};
pub use cookies::{
    expired_cookie, read_cookie, session_cookie, AUTH_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
