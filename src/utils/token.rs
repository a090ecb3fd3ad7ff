use rand::{Rng, distr::Alphanumeric};

const TOKEN_LEN: usize = 48;

/// Opaque session token handed to the client.
pub fn generate_session_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Token prefix safe to write to logs.
pub fn redact(token: &str) -> String {
    format!("{}...", token.chars().take(8).collect::<String>())
}
