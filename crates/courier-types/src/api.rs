use serde::{Deserialize, Serialize};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub password: String,
}

/// Login outcome. A rejected credential is still a well-formed response
/// (`success=false`, no user, no token) — never a server fault.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub message: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub receiver: String,
    pub encrypted_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_login_omits_user_and_token() {
        let resp = LoginResponse {
            success: false,
            user: None,
            token: None,
            message: "Invalid password".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid password");
        assert!(json.get("user").is_none());
        assert!(json.get("token").is_none());
    }

    #[test]
    fn send_request_rejects_unknown_fields() {
        let raw = r#"{"receiver":"Bravo","encrypted_content":"x","extra":1}"#;
        assert!(serde_json::from_str::<SendMessageRequest>(raw).is_err());
    }
}
