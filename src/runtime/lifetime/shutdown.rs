use crate::storage::Storage;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, warn};

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号
    if let Err(e) = signal::ctrl_c().await {
        // 无法监听信号时保持运行，不触发停机
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}

/// 服务停止后释放存储连接
pub async fn close_storage(storage: &Arc<dyn Storage>) {
    match storage.close().await {
        Ok(()) => warn!("Storage connections closed"),
        Err(e) => error!("Failed to close storage: {}", e),
    }
}
