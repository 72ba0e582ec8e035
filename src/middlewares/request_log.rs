/*!
 * 请求日志中间件
 *
 * 每个请求结束后输出一行日志：方法、路径、状态码和耗时。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::App;
 * use crate::middlewares::RequestLog;
 *
 * App::new().wrap(RequestLog);
 * ```
 *
 * ## 日志级别
 *
 * - 2xx/3xx 使用 `info`
 * - 4xx 使用 `warn`
 * - 5xx 使用 `error`
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::Instant;

#[derive(Clone, Copy, Default)]
pub struct RequestLog;

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestLogMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let started = Instant::now();

        Box::pin(async move {
            let res = srv.call(req).await;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            match &res {
                Ok(response) => log_request(&method, &path, response.status(), elapsed_ms),
                Err(e) => log_request(
                    &method,
                    &path,
                    e.as_response_error().status_code(),
                    elapsed_ms,
                ),
            }

            res
        })
    }
}

fn log_request(method: &str, path: &str, status: StatusCode, elapsed_ms: f64) {
    let status = status.as_u16();
    if status >= 500 {
        tracing::error!("{} {} {} {:.3} ms", method, path, status, elapsed_ms);
    } else if status >= 400 {
        tracing::warn!("{} {} {} {:.3} ms", method, path, status, elapsed_ms);
    } else {
        tracing::info!("{} {} {} {:.3} ms", method, path, status, elapsed_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn test_passes_response_through() {
        let app = test::init_service(
            App::new()
                .wrap(RequestLog)
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().body("pong") })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "pong");
    }
}
