//! Compile-time client configuration.
//!
//! The hosted frontend is configured through environment variables at build
//! time; each constant falls back to the local development default.

pub const API_BASE_URL: &str = match option_env!("SERENOVA_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

/// Storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = match option_env!("SERENOVA_TOKEN_STORAGE_KEY") {
    Some(key) => key,
    None => "authToken",
};

/// Storage key holding the JSON-serialized user profile.
pub const USER_DATA_STORAGE_KEY: &str = match option_env!("SERENOVA_USER_DATA_STORAGE_KEY") {
    Some(key) => key,
    None => "userData",
};
