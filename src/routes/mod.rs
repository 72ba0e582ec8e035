pub mod frontend;

pub mod uploads;

pub use frontend::configure_frontend_routes;
pub use uploads::configure_upload_routes;

use crate::errors::UploadError;

/// 未匹配路由的兜底处理
pub async fn not_found() -> Result<actix_web::HttpResponse, UploadError> {
    Err(UploadError::not_found("Not Found"))
}
