use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

pub const COLLECTION: &str = "roller";

/// Permission that short-circuits every other check.
pub const TAM_YETKI: &str = "tam_yetki";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rol {
    pub rol_id: String,
    pub rol_adi: String,
    pub yetkiler: Vec<String>,
    pub olusturulma_tarihi: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YeniRol {
    #[serde(default)]
    pub rol_adi: Option<String>,
    #[serde(default)]
    pub yetkiler: Option<Vec<String>>,
}

impl Rol {
    pub fn create(input: YeniRol) -> Result<Self, ModelError> {
        let rol_adi = match input.rol_adi.as_deref() {
            Some(ad) if !ad.trim().is_empty() => ad.trim().to_string(),
            _ => {
                return Err(ModelError::Validation(
                    "Rol adı ve yetkiler zorunludur".into(),
                ))
            }
        };
        let yetkiler = match input.yetkiler {
            Some(y) if !y.is_empty() => y,
            _ => {
                return Err(ModelError::Validation(
                    "Rol adı ve yetkiler zorunludur".into(),
                ))
            }
        };

        Ok(Self {
            rol_id: Uuid::new_v4().to_string(),
            rol_adi,
            yetkiler,
            olusturulma_tarihi: Utc::now(),
        })
    }

    pub fn has_yetki(&self, yetki: &str) -> bool {
        self.yetkiler.iter().any(|y| y == TAM_YETKI || y == yetki)
    }
}
