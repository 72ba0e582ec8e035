pub mod create;
pub mod download;
pub mod list;
pub mod staging;

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::UploadConfig;
use crate::errors::Result;
use crate::storage::Storage;

/// multipart 中文件字段的名称
pub const FILE_FIELD: &str = "file";
/// multipart 中显示名称字段的名称
pub const NAME_FIELD: &str = "name";

pub struct UploadService {
    storage: Arc<dyn Storage>,
    upload_dir: PathBuf,
    max_size: usize,
}

impl UploadService {
    pub fn new(storage: Arc<dyn Storage>, config: &UploadConfig) -> Self {
        Self {
            storage,
            upload_dir: PathBuf::from(&config.dir),
            max_size: config.max_size,
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn upload_dir(&self) -> &PathBuf {
        &self.upload_dir
    }

    pub(crate) fn max_size(&self) -> usize {
        self.max_size
    }

    // List all uploads
    pub async fn handle_list(&self) -> Result<HttpResponse> {
        list::handle_list(self).await
    }

    // Stream a stored file back
    pub async fn handle_download(
        &self,
        stored_name: &str,
        original_name: &str,
    ) -> Result<HttpResponse> {
        download::handle_download(self, stored_name, original_name).await
    }

    // Handle file upload
    pub async fn handle_create(&self, payload: Multipart) -> Result<HttpResponse> {
        create::handle_create(self, payload).await
    }
}
