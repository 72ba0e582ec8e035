use actix_web::HttpResponse;

use super::UploadService;
use crate::errors::Result;

pub async fn handle_list(service: &UploadService) -> Result<HttpResponse> {
    let uploads = service.storage().list_uploads().await?;
    tracing::debug!("Listing {} upload record(s)", uploads.len());

    Ok(HttpResponse::Ok().json(uploads))
}
