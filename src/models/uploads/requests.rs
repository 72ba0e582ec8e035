use chrono::{DateTime, Utc};

use super::entities::FileDescriptor;

/// 待写入的上传记录（尚未分配 id）
#[derive(Debug, Clone)]
pub struct CreateUploadRequest {
    pub name: Option<String>,
    pub created: DateTime<Utc>,
    pub file: FileDescriptor,
}
