use models::personel::Personel;
use serde::{Deserialize, Serialize};

/// Login input as received on the wire. Field presence is checked by the
/// service, not by serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub eposta: Option<String>,
    #[serde(default)]
    pub sifre: Option<String>,
}

/// JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub personel_id: String,
    pub role: String,
    pub exp: usize,
}

/// Login result: the authenticated staff member, their resolved permission
/// list and a signed token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub personel: Personel,
    pub yetkiler: Vec<String>,
    pub token: String,
}
