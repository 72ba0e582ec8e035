//! 上传记录存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{UploadActiveModel, Uploads};
use crate::entity::uploads::Column;
use crate::errors::{Result, UploadError};
use crate::models::uploads::{entities::UploadRecord, requests::CreateUploadRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建上传记录
    pub async fn create_upload_impl(&self, upload: CreateUploadRequest) -> Result<UploadRecord> {
        let model = UploadActiveModel {
            name: Set(upload.name),
            created: Set(upload.created.timestamp_millis()),
            stored_name: Set(upload.file.stored_name),
            original_name: Set(upload.file.original_name),
            mime_type: Set(upload.file.mime_type),
            size_bytes: Set(upload.file.size_bytes),
            path: Set(upload.file.path),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            UploadError::database_operation(format!("Failed to insert upload record: {e}"))
        })?;

        Ok(result.into_upload_record())
    }

    /// 列出全部上传记录
    pub async fn list_uploads_impl(&self) -> Result<Vec<UploadRecord>> {
        let models = Uploads::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| UploadError::database_operation(format!("Failed to list uploads: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_upload_record()).collect())
    }

    /// 通过 (stored_name, original_name) 获取记录
    pub async fn find_upload_impl(
        &self,
        stored_name: &str,
        original_name: &str,
    ) -> Result<Option<UploadRecord>> {
        let result = Uploads::find()
            .filter(Column::StoredName.eq(stored_name))
            .filter(Column::OriginalName.eq(original_name))
            .one(&self.db)
            .await
            .map_err(|e| UploadError::database_operation(format!("Failed to query upload: {e}")))?;

        Ok(result.map(|m| m.into_upload_record()))
    }
}
