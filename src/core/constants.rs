/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

pub const UNKNOWN_DOCTOR: &str = "Unknown";
