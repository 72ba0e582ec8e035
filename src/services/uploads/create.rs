use actix_multipart::{Field, Multipart};
use actix_web::HttpResponse;
use actix_web::mime::APPLICATION_OCTET_STREAM;
use futures_util::TryStreamExt;

use super::staging::{self, StagedFile};
use super::{FILE_FIELD, NAME_FIELD, UploadService};
use crate::errors::{Result, UploadError};
use crate::models::uploads::requests::CreateUploadRequest;

/// 文本字段的最大长度
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

pub async fn handle_create(service: &UploadService, mut payload: Multipart) -> Result<HttpResponse> {
    // 以收到请求的时间作为记录的创建时间
    let received_at = chrono::Utc::now();
    let upload_dir = service.upload_dir();

    staging::ensure_dirs(upload_dir).await?;

    let mut display_name: Option<String> = None;
    let mut staged: Option<StagedFile> = None;

    while let Some(mut field) = payload.try_next().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            FILE_FIELD => {
                if staged.is_some() {
                    return Err(UploadError::validation(
                        "Only one file can be uploaded at a time",
                    ));
                }

                let original_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .filter(|name| !name.is_empty())
                    .map(|name| name.to_string())
                    .ok_or_else(|| UploadError::validation("File part has no filename"))?;

                // 客户端声明的类型原样保存
                let mime_type = field
                    .content_type()
                    .map(|ct| ct.to_string())
                    .unwrap_or_else(|| APPLICATION_OCTET_STREAM.to_string());

                let mut file = StagedFile::create(upload_dir, original_name, mime_type).await?;
                while let Some(chunk) = field.try_next().await? {
                    file.write_chunk(&chunk, service.max_size()).await?;
                }
                tracing::debug!(
                    "Received {} bytes into staged upload {}",
                    file.size(),
                    file.stored_name()
                );
                staged = Some(file);
            }
            NAME_FIELD => {
                let value = read_text_field(&mut field).await?;
                display_name = Some(value).filter(|v| !v.is_empty());
            }
            _ => {
                // 其他字段忽略，但需要读完
                while field.try_next().await?.is_some() {}
            }
        }
    }

    let staged = staged.ok_or_else(|| UploadError::validation("No file found in upload payload"))?;
    let committed = staged.commit(upload_dir).await?;

    let request = CreateUploadRequest {
        name: display_name,
        created: received_at,
        file: committed.descriptor().clone(),
    };

    // 写入失败或请求被取消时，committed 在 drop 时删除文件
    let record = service.storage().create_upload(request).await?;
    committed.keep();

    tracing::info!(
        "Stored upload {} ({}, {} bytes) as record {}",
        record.file.original_name,
        record.file.mime_type,
        record.file.size_bytes,
        record.id
    );
    Ok(HttpResponse::Ok().json(record))
}

async fn read_text_field(field: &mut Field) -> Result<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if buf.len() + chunk.len() > MAX_TEXT_FIELD_SIZE {
            return Err(UploadError::payload_too_large(format!(
                "Text field exceeds {MAX_TEXT_FIELD_SIZE} bytes"
            )));
        }
        buf.extend_from_slice(&chunk);
    }

    String::from_utf8(buf).map_err(|_| UploadError::validation("Text field is not valid UTF-8"))
}
