use super::dto::UploadResponse;
use crate::common::error::{AppError, AppResult};
use crate::common::upload::{
    generate_unique_filename, simulated_url, validate, FileInfo, Rejection, UploadConstraint,
    UploadKind,
};
use axum::extract::multipart::{Field, MultipartError};
use tracing::info;

pub struct UploadService;

impl UploadService {
    /// Media type declared by the part, falling back to a guess from the file name.
    fn media_type(field: &Field<'_>, file_name: &str) -> String {
        field
            .content_type()
            .map(str::to_owned)
            .filter(|t| !t.is_empty() && t != mime::APPLICATION_OCTET_STREAM.essence_str())
            .unwrap_or_else(|| {
                mime_guess::from_path(file_name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_owned()
            })
    }

    fn read_error(err: MultipartError) -> AppError {
        if err.status().is_client_error() {
            AppError::Validation(err.body_text())
        } else {
            AppError::Submission(format!("Upload interrupted: {}", err.body_text()))
        }
    }

    /// Drains the part counting bytes, stopping as soon as the limit is passed.
    /// Bytes are not persisted; the returned URL is where storage would put them.
    pub async fn accept(
        kind: UploadKind,
        constraint: &UploadConstraint,
        mut field: Field<'_>,
    ) -> AppResult<UploadResponse> {
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let media_type = Self::media_type(&field, &file_name);

        let mut size: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(Self::read_error)?
        {
            size += chunk.len() as u64;
            if size > constraint.max_size {
                return Err(AppError::Validation(
                    Rejection::TooLarge {
                        size,
                        max_size: constraint.max_size,
                    }
                    .to_string(),
                ));
            }
        }

        let file = FileInfo::new(file_name, size, media_type);
        validate(&file, constraint).map_err(|r| AppError::Validation(r.to_string()))?;

        let filename = generate_unique_filename(&file.name);
        let url = simulated_url(kind, &filename);
        info!(kind = %kind, size, "Accepted upload {} as {}", file.name, filename);

        Ok(UploadResponse {
            success: true,
            url,
            filename,
            size,
        })
    }
}
