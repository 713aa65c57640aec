use yoda_types::ErrorBody;

pub const GAME_UNREACHABLE: &str = "Could not connect to the game server.";
pub const CHAT_UNREACHABLE: &str = "Could not send message.";
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the server.";
const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Message for a non-2xx answer: the body's `detail`/`message` when the body
/// is JSON and carries one, `API Error: <status>` otherwise.
pub fn describe_http_failure(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.user_message())
        .unwrap_or_else(|| format!("API Error: {}", status))
}

/// Text shown in an error area.
pub fn error_text(message: &str) -> String {
    if message.is_empty() {
        format!("Error: {}", UNKNOWN_ERROR)
    } else {
        format!("Error: {}", message)
    }
}
