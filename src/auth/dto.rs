use serde::{Deserialize, Serialize};

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LogonCredentials {
    pub email: String,
    pub password: String,
}

/// Request body for logout.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct UserSession {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub token: String,
}
