//! 全局错误渲染
//!
//! 所有 4xx/5xx 响应都经过这里：先在服务端记录日志，再按 [`ErrorPolicy`] 决定响应体。
//! - `expose_stack_traces = true`：返回 JSON 错误对象，5xx 额外携带 `detail`
//! - `expose_stack_traces = false`：只返回错误信息文本

use actix_web::{
    HttpResponse, Result,
    dev::ServiceResponse,
    http::StatusCode,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    web,
};
use serde::Serialize;

use crate::errors::UploadError;

/// 错误响应的详细程度，启动时由配置决定
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPolicy {
    pub expose_stack_traces: bool,
}

/// 完整错误对象
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub code: &'static str,
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// 非 UploadError 的错误使用的代码
const UNCLASSIFIED_CODE: &str = "E000";

pub fn error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(render_error)
}

fn render_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let expose = res
        .request()
        .app_data::<web::Data<ErrorPolicy>>()
        .map(|policy| policy.expose_stack_traces)
        .unwrap_or(false);

    let body = describe(status, res.response().error());
    if status.is_server_error() {
        tracing::error!(
            "{} {} -> {} [{}] {}",
            res.request().method(),
            res.request().path(),
            status.as_u16(),
            body.code,
            body.detail.as_deref().unwrap_or(&body.message)
        );
    } else {
        tracing::warn!(
            "{} {} -> {} [{}] {}",
            res.request().method(),
            res.request().path(),
            status.as_u16(),
            body.code,
            body.message
        );
    }

    let (req, _) = res.into_parts();
    let response = if expose {
        HttpResponse::build(status).json(body)
    } else {
        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(body.message)
    };

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

fn describe(status: StatusCode, error: Option<&actix_web::Error>) -> ErrorBody {
    let reason = status.canonical_reason().unwrap_or("Error");
    // detail 只对 5xx 提供，4xx 在任何模式下都不携带
    let with_detail = status.is_server_error();

    match error {
        Some(err) => match err.as_error::<UploadError>() {
            Some(upload_err) => ErrorBody {
                status: status.as_u16(),
                code: upload_err.code(),
                error_type: upload_err.error_type().to_string(),
                message: upload_err.message().to_string(),
                detail: with_detail.then(|| format!("{upload_err:?}")),
            },
            None => ErrorBody {
                status: status.as_u16(),
                code: UNCLASSIFIED_CODE,
                error_type: reason.to_string(),
                message: err.to_string(),
                detail: with_detail.then(|| format!("{err:?}")),
            },
        },
        None => ErrorBody {
            status: status.as_u16(),
            code: UNCLASSIFIED_CODE,
            error_type: reason.to_string(),
            message: reason.to_string(),
            detail: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    async fn failing() -> std::result::Result<HttpResponse, UploadError> {
        Err(UploadError::database_operation("connection reset"))
    }

    async fn missing() -> std::result::Result<HttpResponse, UploadError> {
        Err(UploadError::not_found("nothing here"))
    }

    async fn call(expose: bool, uri: &str) -> (StatusCode, String, Vec<u8>) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ErrorPolicy {
                    expose_stack_traces: expose,
                }))
                .wrap(error_handlers())
                .route("/fail", web::get().to(failing))
                .route("/missing", web::get().to(missing)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = test::read_body(res).await.to_vec();
        (status, content_type, body)
    }

    #[actix_web::test]
    async fn test_production_returns_message_only() {
        let (status, content_type, body) = call(false, "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body, b"connection reset");
    }

    #[actix_web::test]
    async fn test_development_returns_error_object() {
        let (status, content_type, body) = call(true, "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(content_type.starts_with("application/json"));

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 500);
        assert_eq!(json["code"], "E003");
        assert_eq!(json["type"], "Database Operation Error");
        assert_eq!(json["message"], "connection reset");
        assert!(json["detail"].as_str().unwrap().contains("DatabaseOperation"));
    }

    #[actix_web::test]
    async fn test_client_errors_never_carry_detail() {
        let (status, _, body) = call(true, "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "E007");
        assert!(json.get("detail").is_none());
    }

    #[actix_web::test]
    async fn test_plain_status_without_error() {
        let (status, _, body) = call(false, "/unrouted").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Not Found");
    }
}
