use serde::Deserialize;

/// Body of `POST /users`.
#[derive(Debug, Deserialize)]
pub struct UserRegistration {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}
