use actix_web::HttpServer;
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use upload_station::app::{AppState, build_app};
use upload_station::config::AppConfig;
use upload_station::middlewares::ErrorPolicy;
use upload_station::runtime::lifetime;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // 记录程序启动时间
    let app_start_time = chrono::Utc::now();

    // 启动前预处理 //

    // 初始化配置
    setup_panic!();
    AppConfig::init().map_err(|e| {
        std::io::Error::other(format!("Failed to initialize configuration: {e}"))
    })?;
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    // 打印信息
    warn!(
        "Starting pre-startup processing...
        Project: {}
        Version: {}
        Environment: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    // 存储不可用时直接退出
    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .map_err(|e| std::io::Error::other(format!("Startup failed: {e}")))?;
    let storage = startup.storage.clone();

    let state = AppState::new(
        storage.clone(),
        &config.upload,
        ErrorPolicy {
            expose_stack_traces: config.app.expose_stack_traces,
        },
    );

    // 输出预处理时间
    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time)
            .num_milliseconds()
    );

    // 预处理完成 //

    warn!("Using {} CPU cores for the server", config.server.workers);

    let bind_address = config.server_bind_address();
    warn!("Starting server at http://{}", bind_address);

    // Start the HTTP server
    let server = HttpServer::new(move || build_app(state.clone()))
        .keep_alive(std::time::Duration::from_secs(
            config.server.timeouts.keep_alive,
        )) // 启用长连接
        .client_request_timeout(std::time::Duration::from_millis(
            config.server.timeouts.client_request,
        )) // 客户端超时
        .client_disconnect_timeout(std::time::Duration::from_millis(
            config.server.timeouts.client_disconnect,
        )) // 断连超时
        .workers(config.server.workers)
        .disable_signals()
        .bind(bind_address)?
        .run();

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        lifetime::shutdown::listen_for_shutdown().await;
        handle.stop(true).await;
    });

    let result = server.await;
    lifetime::shutdown::close_storage(&storage).await;
    warn!("Graceful shutdown: all tasks completed");

    result
}
