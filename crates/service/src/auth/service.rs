use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation as JwtValidation,
};
use models::{personel::Personel, validators::is_valid_email};
use rand::rngs::OsRng;
use tracing::{info, instrument};

use super::domain::{AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Hash a plaintext password with argon2 and a fresh salt.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

/// Check a plaintext password against a stored argon2 hash. An unparsable
/// hash is an error, a mismatch is `Ok(false)`.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Authenticate a staff member and issue a token.
    ///
    /// The returned session carries the record as it was before this login,
    /// so `son_giris` still shows the previous visit while the store already
    /// holds the new one.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::personel::{Personel, YeniPersonel};
    /// use service::auth::{hash_password, AuthConfig, AuthService};
    /// use service::auth::domain::LoginInput;
    /// use service::auth::repository::mock::MockAuthRepository;
    ///
    /// let personel = Personel::create(
    ///     YeniPersonel {
    ///         personel_ad: Some("Ali".into()),
    ///         personel_soyad: Some("Yılmaz".into()),
    ///         personel_eposta_adresi: Some("ali@depo.com".into()),
    ///         personel_sifre: Some("Gizli1234".into()),
    ///         firma_firma_id: Some("firma-1".into()),
    ///         ..Default::default()
    ///     },
    ///     |sifre| hash_password(sifre).map_err(|e| models::errors::ModelError::Validation(e.to_string())),
    /// )
    /// .unwrap();
    ///
    /// let repo = Arc::new(MockAuthRepository::default());
    /// repo.add_personel(personel);
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "sir".into(), token_ttl_hours: 24 });
    ///
    /// let session = tokio_test::block_on(svc.login(LoginInput {
    ///     eposta: Some("ali@depo.com".into()),
    ///     sifre: Some("Gizli1234".into()),
    /// }))
    /// .unwrap();
    /// assert_eq!(session.personel.personel_eposta_adresi, "ali@depo.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(eposta = input.eposta.as_deref().unwrap_or("")))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let (eposta, sifre) = match (input.eposta.as_deref(), input.sifre.as_deref()) {
            (Some(e), Some(s)) if !e.is_empty() && !s.is_empty() => (e, s),
            _ => return Err(AuthError::Validation("E-posta ve şifre zorunludur".into())),
        };
        if !is_valid_email(eposta) {
            return Err(AuthError::Validation("Geçersiz e-posta formatı".into()));
        }

        let personel = self
            .repo
            .find_personel_by_eposta(eposta)
            .await?
            .ok_or_else(|| AuthError::Unauthorized("Geçersiz e-posta veya şifre".into()))?;

        if !verify_password(sifre, &personel.personel_sifre)? {
            return Err(AuthError::Unauthorized("Geçersiz e-posta veya şifre".into()));
        }

        self.repo.update_son_giris(&personel.personel_id, Utc::now()).await?;

        let yetkiler = self.yetkiler_of(&personel).await?;
        let token = self.issue_token(&personel)?;
        info!(personel_id = %personel.personel_id, "giris_basarili");
        Ok(AuthSession { personel, yetkiler, token })
    }

    /// Sign a token carrying the staff id and role name.
    pub fn issue_token(&self, personel: &Personel) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
        let claims = Claims {
            personel_id: personel.personel_id.clone(),
            role: personel.rol.clone(),
            exp,
        };
        encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode and validate a token. Expired or tampered tokens all collapse
    /// into the same client-facing message.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &JwtValidation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::Unauthorized("Yetkilendirme hatası: Geçersiz token".into()))
    }

    /// Resolve a token to the staff record it was issued for.
    pub async fn identify(&self, token: &str) -> Result<Personel, AuthError> {
        let claims = self.verify_token(token)?;
        self.repo.find_personel_by_id(&claims.personel_id).await?.ok_or_else(|| {
            AuthError::Unauthorized("Yetkilendirme hatası: Kullanıcı bulunamadı".into())
        })
    }

    /// Check that the staff member may perform an operation guarded by
    /// `required` permissions.
    ///
    /// An empty `required` list always passes. A role name listed directly in
    /// `required` passes without a role lookup; otherwise the role document
    /// decides, with `tam_yetki` overriding everything.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::personel::{Personel, YeniPersonel};
    /// use models::rol::{Rol, YeniRol};
    /// use service::auth::{hash_password, AuthConfig, AuthService};
    /// use service::auth::repository::mock::MockAuthRepository;
    ///
    /// let personel = Personel::create(
    ///     YeniPersonel {
    ///         personel_ad: Some("Ayşe".into()),
    ///         personel_soyad: Some("Demir".into()),
    ///         personel_eposta_adresi: Some("ayse@depo.com".into()),
    ///         personel_sifre: Some("Gizli1234".into()),
    ///         firma_firma_id: Some("firma-1".into()),
    ///         rol: Some("depocu".into()),
    ///         ..Default::default()
    ///     },
    ///     |sifre| hash_password(sifre).map_err(|e| models::errors::ModelError::Validation(e.to_string())),
    /// )
    /// .unwrap();
    ///
    /// let repo = Arc::new(MockAuthRepository::default());
    /// repo.add_rol(Rol::create(YeniRol {
    ///     rol_adi: Some("depocu".into()),
    ///     yetkiler: Some(vec!["stok_goruntuleme".into()]),
    /// }).unwrap());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "sir".into(), token_ttl_hours: 24 });
    ///
    /// assert!(tokio_test::block_on(svc.authorize(&personel, &["stok_goruntuleme"])).is_ok());
    /// assert!(tokio_test::block_on(svc.authorize(&personel, &["personel_ekleme"])).is_err());
    /// ```
    pub async fn authorize(&self, personel: &Personel, required: &[&str]) -> Result<(), AuthError> {
        if required.is_empty() {
            return Ok(());
        }
        if required.contains(&personel.rol.as_str()) {
            return Ok(());
        }
        let rol = self
            .repo
            .find_rol_by_adi(&personel.rol)
            .await?
            .ok_or_else(|| AuthError::Forbidden("Yetkilendirme hatası: Rol bulunamadı".into()))?;
        if required.iter().any(|yetki| rol.has_yetki(yetki)) {
            return Ok(());
        }
        Err(AuthError::Forbidden(
            "Yetkilendirme hatası: Bu işlem için yetkiniz bulunmamaktadır".into(),
        ))
    }

    /// Permission list for a staff member. No role document means no
    /// permissions, not an error.
    pub async fn yetkiler_of(&self, personel: &Personel) -> Result<Vec<String>, AuthError> {
        if personel.rol.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .repo
            .find_rol_by_adi(&personel.rol)
            .await?
            .map(|rol| rol.yetkiler)
            .unwrap_or_default())
    }
}
