use serde::{Deserialize, Serialize};

use crate::Move;

/// Versioned prefix every endpoint lives under.
pub const API_PREFIX: &str = "/api/v1";
pub const SCORE_PATH: &str = "/score";
pub const CHAT_PATH: &str = "/chat";

pub fn play_path(player_move: Move) -> String {
    format!("/play/{}", player_move)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub yoda_response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_path_uses_token() {
        assert_eq!(play_path(Move::Rock), "/play/rock");
        assert_eq!(play_path(Move::Lizard), "/play/lizard");
    }

    #[test]
    fn test_chat_request_shape() {
        let body = serde_json::to_value(ChatRequest {
            user_message: "hello".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "user_message": "hello" }));
    }
}
