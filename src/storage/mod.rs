use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::uploads::{entities::UploadRecord, requests::CreateUploadRequest};

pub mod sea_orm_storage;

/// 上传记录存储
///
/// 记录只增不改，不提供删除；文件与记录之间没有级联关系。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // 写入一条上传记录，返回持久化后的记录（含分配的 id）
    async fn create_upload(&self, upload: CreateUploadRequest) -> Result<UploadRecord>;
    // 列出全部上传记录
    async fn list_uploads(&self) -> Result<Vec<UploadRecord>>;
    // 通过 (stored_name, original_name) 查找记录
    async fn find_upload(
        &self,
        stored_name: &str,
        original_name: &str,
    ) -> Result<Option<UploadRecord>>;
    // 关闭底层连接池
    async fn close(&self) -> Result<()>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
