//! 上传记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "uploads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
    pub created: i64,
    pub stored_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub path: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_upload_record(self) -> crate::models::uploads::entities::UploadRecord {
        use crate::models::uploads::entities::{FileDescriptor, UploadRecord};
        use chrono::{DateTime, Utc};

        UploadRecord {
            id: self.id,
            name: self.name,
            created: DateTime::<Utc>::from_timestamp_millis(self.created).unwrap_or_default(),
            file: FileDescriptor {
                stored_name: self.stored_name,
                original_name: self.original_name,
                mime_type: self.mime_type,
                size_bytes: self.size_bytes,
                path: self.path,
            },
        }
    }
}
