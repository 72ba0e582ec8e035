//! HTTP 应用组装
//!
//! `build_app` 同时被 `main` 和测试使用，保证两者挂载的中间件与路由一致。

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use std::sync::Arc;

use crate::config::UploadConfig;
use crate::middlewares::{ErrorPolicy, RequestLog, error_handlers};
use crate::routes;
use crate::services::UploadService;
use crate::storage::Storage;

/// 跨 worker 共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub uploads: web::Data<UploadService>,
    pub error_policy: ErrorPolicy,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, upload: &UploadConfig, error_policy: ErrorPolicy) -> Self {
        Self {
            uploads: web::Data::new(UploadService::new(storage, upload)),
            error_policy,
        }
    }
}

pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state.uploads)
        .app_data(web::Data::new(state.error_policy))
        .wrap(error_handlers())
        .wrap(RequestLog)
        .configure(routes::configure_frontend_routes) // 首页与静态资源
        .configure(routes::configure_upload_routes) // 上传相关路由
        .default_service(web::to(routes::not_found))
}
