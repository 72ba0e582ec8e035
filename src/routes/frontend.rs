//! 前端静态资源路由
//!
//! 使用 rust-embed 嵌入 `frontend/` 目录：
//! - `GET /` 返回 index.html
//! - `GET /assets/{path}` 返回脚本、样式等资源

use actix_web::{HttpRequest, HttpResponse, web};
use rust_embed::Embed;
use std::path::Path;

use crate::errors::UploadError;

/// 嵌入前端静态资源
/// 编译时从 frontend/ 目录读取文件
#[derive(Embed)]
#[folder = "frontend/"]
struct FrontendAssets;

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 从嵌入资源中取文件，拒绝包含 `..` 的路径
fn get_embedded_file(path: &str) -> Option<Vec<u8>> {
    if path.split('/').any(|segment| segment == "..") {
        return None;
    }
    FrontendAssets::get(path).map(|f| f.data.to_vec())
}

fn serve_embedded(path: &str) -> Result<HttpResponse, UploadError> {
    let data = get_embedded_file(path)
        .ok_or_else(|| UploadError::not_found(format!("Asset {path} not found")))?;

    Ok(HttpResponse::Ok()
        .content_type(get_mime_type(path))
        .insert_header(("Cache-Control", "no-cache"))
        .body(data))
}

/// 首页
pub async fn serve_index() -> Result<HttpResponse, UploadError> {
    serve_embedded("index.html")
}

/// 静态资源
pub async fn serve_asset(req: HttpRequest) -> Result<HttpResponse, UploadError> {
    let tail = req.match_info().query("tail").trim_start_matches('/');
    serve_embedded(&format!("assets/{tail}"))
}

/// 配置前端路由
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index))
        .route("/assets/{tail:.*}", web::get().to(serve_asset));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("assets/app.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("assets/style.css"), "text/css; charset=utf-8");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_embedded_assets_present() {
        assert!(get_embedded_file("index.html").is_some());
        assert!(get_embedded_file("assets/app.js").is_some());
        assert!(get_embedded_file("assets/../index.html").is_none());
        assert!(get_embedded_file("assets/missing.js").is_none());
    }
}
