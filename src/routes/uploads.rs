use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};

use crate::errors::UploadError;
use crate::services::UploadService;

pub async fn list_uploads(
    service: web::Data<UploadService>,
) -> Result<HttpResponse, UploadError> {
    service.handle_list().await
}

pub async fn download_upload(
    service: web::Data<UploadService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, UploadError> {
    let (stored_name, original_name) = path.into_inner();
    service.handle_download(&stored_name, &original_name).await
}

pub async fn create_upload(
    service: web::Data<UploadService>,
    payload: Multipart,
) -> Result<HttpResponse, UploadError> {
    service.handle_create(payload).await
}

// 配置路由
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/uploads")
            .route("", web::get().to(list_uploads))
            .route("", web::post().to(create_upload))
            .route(
                "/{stored_name}/{original_name}",
                web::get().to(download_upload),
            ),
    );
}
