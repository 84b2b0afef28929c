use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::{personel::Personel, rol::Rol};

use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_personel_by_eposta(&self, eposta: &str) -> Result<Option<Personel>, AuthError>;
    async fn find_personel_by_id(&self, personel_id: &str) -> Result<Option<Personel>, AuthError>;
    async fn update_son_giris(
        &self,
        personel_id: &str,
        zaman: DateTime<Utc>,
    ) -> Result<(), AuthError>;
    async fn find_rol_by_adi(&self, rol_adi: &str) -> Result<Option<Rol>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        personeller: Mutex<HashMap<String, Personel>>, // key: personel_id
        roller: Mutex<HashMap<String, Rol>>,           // key: rol_adi
    }

    impl MockAuthRepository {
        pub fn add_personel(&self, personel: Personel) {
            let mut personeller = self.personeller.lock().unwrap();
            personeller.insert(personel.personel_id.clone(), personel);
        }

        pub fn add_rol(&self, rol: Rol) {
            let mut roller = self.roller.lock().unwrap();
            roller.insert(rol.rol_adi.clone(), rol);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_personel_by_eposta(
            &self,
            eposta: &str,
        ) -> Result<Option<Personel>, AuthError> {
            let personeller = self.personeller.lock().unwrap();
            Ok(personeller
                .values()
                .find(|p| p.personel_eposta_adresi == eposta)
                .cloned())
        }

        async fn find_personel_by_id(
            &self,
            personel_id: &str,
        ) -> Result<Option<Personel>, AuthError> {
            let personeller = self.personeller.lock().unwrap();
            Ok(personeller.get(personel_id).cloned())
        }

        async fn update_son_giris(
            &self,
            personel_id: &str,
            zaman: DateTime<Utc>,
        ) -> Result<(), AuthError> {
            let mut personeller = self.personeller.lock().unwrap();
            if let Some(personel) = personeller.get_mut(personel_id) {
                personel.son_giris = Some(zaman);
            }
            Ok(())
        }

        async fn find_rol_by_adi(&self, rol_adi: &str) -> Result<Option<Rol>, AuthError> {
            let roller = self.roller.lock().unwrap();
            Ok(roller.get(rol_adi).cloned())
        }
    }
}
