use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Perfil del usuario tal como lo devuelve el backend.
/// Opaco: se guarda y se devuelve sin interpretar sus campos.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct UserProfile(pub Map<String, Value>);

/// `user` que no sea un objeto se trata como ausente
fn lenient_profile<'de, D>(deserializer: D) -> Result<Option<UserProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Some(UserProfile(map)),
        _ => None,
    })
}

/// Token + perfil, solo existe si hay token
#[derive(Clone, PartialEq, Debug)]
pub struct Session {
    pub token: String,
    pub user: Option<UserProfile>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(rename = "loginIdentifier")]
    pub login_identifier: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, deserialize_with = "lenient_profile")]
    pub user: Option<UserProfile>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Datos del formulario de registro (antes de validar)
#[derive(Clone, PartialEq, Debug, Default)]
pub struct RegisterForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct AuthStatus {
    #[serde(rename = "isLoggedIn", default)]
    pub is_logged_in: bool,
    #[serde(default, deserialize_with = "lenient_profile")]
    pub user: Option<UserProfile>,
}
