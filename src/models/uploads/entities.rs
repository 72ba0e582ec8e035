use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 已落盘文件的描述信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    // 生成的唯一文件名，即磁盘上的文件名
    pub stored_name: String,
    // 客户端提交的原始文件名，仅用于下载
    pub original_name: String,
    // 客户端声明的 MIME 类型
    pub mime_type: String,
    // 文件大小（字节）
    pub size_bytes: i64,
    // 文件在存储目录中的路径
    pub path: String,
}

/// 一次上传对应的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: i64,
    pub name: Option<String>,
    pub created: DateTime<Utc>,
    pub file: FileDescriptor,
}
