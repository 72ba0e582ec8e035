use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::uploads::staging::ensure_dirs;
use crate::storage::Storage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
/// 连接存储并执行迁移，确保上传目录存在。任何一步失败都直接返回错误
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let upload_dir = Path::new(&config.upload.dir);
    ensure_dirs(upload_dir).await?;
    debug!(
        "Upload directory ready at {} (max {} bytes per file)",
        upload_dir.display(),
        config.upload.max_size
    );

    Ok(StartupContext { storage })
}
