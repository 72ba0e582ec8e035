use actix_web::HttpResponse;
use actix_web::http::header::{
    Charset, ContentDisposition, ContentType, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::mime::{APPLICATION_OCTET_STREAM, Mime};
use tokio_util::io::ReaderStream;

use super::UploadService;
use crate::errors::{Result, UploadError};

pub async fn handle_download(
    service: &UploadService,
    stored_name: &str,
    original_name: &str,
) -> Result<HttpResponse> {
    // 找不到记录时直接返回 404，不访问文件系统
    let Some(record) = service
        .storage()
        .find_upload(stored_name, original_name)
        .await?
    else {
        return Err(UploadError::not_found(format!(
            "No upload matches {stored_name}/{original_name}"
        )));
    };

    let file = match tokio::fs::File::open(&record.file.path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                "Record {} points to missing file {}",
                record.id,
                record.file.path
            );
            return Err(UploadError::not_found("File content is missing"));
        }
        Err(e) => {
            return Err(UploadError::file_operation(format!(
                "Failed to open {}: {e}",
                record.file.path
            )));
        }
    };
    let length = file.metadata().await?.len();

    let content_type = record
        .file
        .mime_type
        .parse::<Mime>()
        .unwrap_or(APPLICATION_OCTET_STREAM);

    Ok(HttpResponse::Ok()
        .insert_header(ContentType(content_type))
        .insert_header(attachment(record.file.original_name))
        .no_chunking(length)
        .streaming(ReaderStream::new(file)))
}

/// 非 ASCII 文件名额外携带 RFC 5987 编码的 `filename*`
fn attachment(filename: String) -> ContentDisposition {
    let mut parameters = Vec::with_capacity(2);
    if !filename.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: filename.clone().into_bytes(),
        }));
    }
    parameters.insert(0, DispositionParam::Filename(filename));

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}
