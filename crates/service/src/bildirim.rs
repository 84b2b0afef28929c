use models::bildirim::Bildirim;
use serde::Deserialize;

use crate::{errors::ServiceError, storage::depo::DepoStore};

/// Direct notification input. The wire uses `userId`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KullaniciBildirimGirdisi {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub notification_type: Option<String>,
}

/// Role broadcast input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RolBildirimGirdisi {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub notification_type: Option<String>,
}

/// Send a notification to one staff member.
pub async fn send_user_notification(
    store: &DepoStore,
    girdi: KullaniciBildirimGirdisi,
) -> Result<Bildirim, ServiceError> {
    let (user_id, title, message) = match (girdi.user_id, girdi.title, girdi.message) {
        (Some(u), Some(t), Some(m)) if !u.is_empty() && !t.is_empty() && !m.is_empty() => (u, t, m),
        _ => {
            return Err(ServiceError::Validation(
                "User ID, title and message are required".into(),
            ))
        }
    };

    if store.personeller.get(&user_id).await?.is_none() {
        return Err(ServiceError::NotFound("User not found".into()));
    }

    let bildirim = Bildirim::new(user_id, title, message, girdi.notification_type);
    store.bildirimler.insert(&bildirim.notification_id, &bildirim).await?;
    Ok(bildirim)
}

/// Send a notification to every staff member holding a role. A role nobody
/// holds sends nothing and is not an error.
pub async fn send_role_notification(
    store: &DepoStore,
    girdi: RolBildirimGirdisi,
) -> Result<Vec<Bildirim>, ServiceError> {
    let (role, title, message) = match (girdi.role, girdi.title, girdi.message) {
        (Some(r), Some(t), Some(m)) if !r.is_empty() && !t.is_empty() && !m.is_empty() => (r, t, m),
        _ => return Err(ServiceError::Validation("Role, title and message are required".into())),
    };

    let alicilar = store.personeller.find_eq("rol", &role).await?;
    let mut bildirimler = Vec::with_capacity(alicilar.len());
    for personel in alicilar {
        let bildirim = Bildirim::new(
            personel.personel_id,
            title.clone(),
            message.clone(),
            girdi.notification_type.clone(),
        );
        store.bildirimler.insert(&bildirim.notification_id, &bildirim).await?;
        bildirimler.push(bildirim);
    }
    Ok(bildirimler)
}

/// Notifications of one staff member, newest first.
pub async fn list_user_notifications(
    store: &DepoStore,
    user_id: &str,
    only_unread: bool,
) -> Result<Vec<Bildirim>, ServiceError> {
    let mut bildirimler: Vec<Bildirim> = store
        .bildirimler
        .find_eq("user_id", user_id)
        .await?
        .into_iter()
        .filter(|b| !only_unread || !b.is_read)
        .collect();
    bildirimler.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(bildirimler)
}

/// Mark a notification as read, refusing notifications that belong to
/// someone else.
pub async fn mark_as_read(
    store: &DepoStore,
    notification_id: &str,
    user_id: &str,
) -> Result<Bildirim, ServiceError> {
    let mut bildirim = store
        .bildirimler
        .get(notification_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Notification not found".into()))?;

    if bildirim.user_id != user_id {
        return Err(ServiceError::Forbidden(
            "Access denied: Notification does not belong to this user".into(),
        ));
    }

    bildirim.mark_read();
    store.bildirimler.insert(&bildirim.notification_id, &bildirim).await?;
    Ok(bildirim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_firma_ve_personel, temp_store};

    fn girdi(user_id: &str) -> KullaniciBildirimGirdisi {
        KullaniciBildirimGirdisi {
            user_id: Some(user_id.into()),
            title: Some("Sayım".into()),
            message: Some("Depo sayımı yarın başlıyor".into()),
            notification_type: None,
        }
    }

    #[tokio::test]
    async fn send_user_notification_validates_and_defaults_type() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;
        let (_, personel) = seed_firma_ve_personel(&store, "ali@depo.com").await;

        let bildirim = send_user_notification(&store, girdi(&personel.personel_id)).await?;
        assert_eq!(bildirim.notification_type, "info");
        assert!(!bildirim.is_read);

        let err = send_user_notification(&store, girdi("yok")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "User not found");

        let err = send_user_notification(&store, KullaniciBildirimGirdisi::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User ID, title and message are required");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn send_role_notification_reaches_every_holder() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;
        let (_, birinci) = seed_firma_ve_personel(&store, "a@depo.com").await;
        let (_, ikinci) = seed_firma_ve_personel(&store, "b@depo.com").await;

        let gonderilen = send_role_notification(
            &store,
            RolBildirimGirdisi {
                role: Some(birinci.rol.clone()),
                title: Some("Duyuru".into()),
                message: Some("Vardiya değişti".into()),
                notification_type: None,
            },
        )
        .await?;
        assert_eq!(gonderilen.len(), 2);

        assert_eq!(list_user_notifications(&store, &ikinci.personel_id, false).await?.len(), 1);

        let bos = send_role_notification(
            &store,
            RolBildirimGirdisi {
                role: Some("hayalet".into()),
                title: Some("Duyuru".into()),
                message: Some("Kimse okumayacak".into()),
                notification_type: None,
            },
        )
        .await?;
        assert!(bos.is_empty());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn mark_as_read_checks_ownership() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;
        let (_, sahip) = seed_firma_ve_personel(&store, "a@depo.com").await;
        let (_, baskasi) = seed_firma_ve_personel(&store, "b@depo.com").await;

        let bildirim = send_user_notification(&store, girdi(&sahip.personel_id)).await?;

        let err = mark_as_read(&store, &bildirim.notification_id, &baskasi.personel_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert_eq!(err.to_string(), "Access denied: Notification does not belong to this user");

        let okundu = mark_as_read(&store, &bildirim.notification_id, &sahip.personel_id).await?;
        assert!(okundu.is_read);
        assert!(okundu.read_at.is_some());

        let yok = mark_as_read(&store, "yok", &sahip.personel_id).await.unwrap_err();
        assert_eq!(yok.to_string(), "Notification not found");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn unread_filter_hides_read_notifications() -> Result<(), anyhow::Error> {
        let (store, dir) = temp_store().await;
        let (_, personel) = seed_firma_ve_personel(&store, "a@depo.com").await;

        let birinci = send_user_notification(&store, girdi(&personel.personel_id)).await?;
        send_user_notification(&store, girdi(&personel.personel_id)).await?;
        mark_as_read(&store, &birinci.notification_id, &personel.personel_id).await?;

        assert_eq!(list_user_notifications(&store, &personel.personel_id, false).await?.len(), 2);
        let okunmamis = list_user_notifications(&store, &personel.personel_id, true).await?;
        assert_eq!(okunmamis.len(), 1);
        assert_ne!(okunmamis[0].notification_id, birinci.notification_id);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
