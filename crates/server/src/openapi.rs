use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(ToSchema)]
pub struct GirisRequest {
    pub eposta: String,
    pub sifre: String,
}

#[derive(ToSchema)]
pub struct YeniFirmaRequest {
    pub firma_ad: String,
    pub firma_vergi_no: String,
    pub firma_telefon: String,
    pub firma_adres: Option<String>,
    pub firma_eposta_adresi: Option<String>,
    pub firma_sahibi: Option<String>,
}

#[derive(ToSchema)]
pub struct YeniPersonelRequest {
    pub personel_ad: String,
    pub personel_soyad: String,
    pub personel_telefon_no: Option<String>,
    pub personel_eposta_adresi: String,
    pub personel_sifre: String,
    pub firma_firma_id: String,
    pub rol: Option<String>,
}

#[derive(ToSchema)]
pub struct YeniRolRequest {
    pub rol_adi: String,
    pub yetkiler: Vec<String>,
}

#[derive(ToSchema)]
pub struct YeniTedarikciRequest {
    pub tedarikci_ad: String,
    pub tedarikci_telefon_no: String,
    pub tedarikci_adresi: Option<String>,
    pub tedarikci_eposta_adresi: Option<String>,
}

#[derive(ToSchema)]
pub struct YeniSiparisRequest {
    pub urun_kodu: String,
    pub urun_adi: String,
    pub urun_miktari: f64,
    pub tedarikci_tedarikci_id: String,
    pub personel_personel_id: String,
}

#[derive(ToSchema)]
pub struct YeniUrunRequest {
    pub urun_kodu: String,
    pub urun_adi: String,
    pub urun_barkod: Option<String>,
    pub depo_bilgisi: Option<String>,
    pub baslangic_stok_miktari: Option<f64>,
}

#[derive(ToSchema)]
pub struct StokCikisRequest {
    pub urun_kodu: String,
    pub cikis_miktari: f64,
    pub aciklama: Option<String>,
}

#[derive(ToSchema, serde::Deserialize)]
pub struct KullaniciBildirimRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
}

#[derive(ToSchema, serde::Deserialize)]
pub struct RolBildirimRequest {
    pub role: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::status,
        crate::routes::setup_database,
        crate::routes::auth::giris,
        crate::routes::firma::create,
        crate::routes::firma::get,
        crate::routes::firma::update,
        crate::routes::firma::list,
        crate::routes::personel::create,
        crate::routes::personel::list,
        crate::routes::personel::son_giris,
        crate::routes::personel::create_rol,
        crate::routes::personel::list_roller,
        crate::routes::tedarikci::create,
        crate::routes::tedarikci::list,
        crate::routes::tedarikci::get,
        crate::routes::siparis::create,
        crate::routes::siparis::get,
        crate::routes::siparis::list,
        crate::routes::siparis::update_durum,
        crate::routes::siparis::urun_girisi,
        crate::routes::stok::urun_ekle,
        crate::routes::stok::gorsel_yukle,
        crate::routes::stok::urun_listesi,
        crate::routes::stok::cikis,
        crate::routes::stok::hareketler,
        crate::routes::stok::durum,
        crate::routes::reports::stock_status,
        crate::routes::reports::order_status,
        crate::routes::reports::supplier_performance,
        crate::routes::notifications::list,
        crate::routes::notifications::mark_read,
        crate::routes::notifications::send_user,
        crate::routes::notifications::send_role,
    ),
    components(
        schemas(
            HealthResponse,
            GirisRequest,
            YeniFirmaRequest,
            YeniPersonelRequest,
            YeniRolRequest,
            YeniTedarikciRequest,
            YeniSiparisRequest,
            YeniUrunRequest,
            StokCikisRequest,
            KullaniciBildirimRequest,
            RolBildirimRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "firma"),
        (name = "personel"),
        (name = "tedarikci"),
        (name = "siparis"),
        (name = "stok"),
        (name = "reports"),
        (name = "notifications")
    )
)]
pub struct ApiDoc;
