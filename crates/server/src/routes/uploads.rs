use axum::extract::{Multipart, State};
use axum::Json;
use common::i18n::ErrorContext;
use service::upload::UploadedImage;
use tracing::warn;

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::ServerState;

/// Accepts one multipart field named `file` and forwards it to the image host.
#[utoipa::path(post, path = "/admin/uploads/image", tag = "uploads", request_body(content = String, content_type = "multipart/form-data", description = "Field `file`: the image"), responses((status = 200, description = "Hosted image URL"), (status = 400, description = "Missing, empty or non-image file"), (status = 503, description = "Uploads not configured")))]
pub async fn upload_image(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<Json<UploadedImage>, JsonApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                warn!(err = %e, "multipart_read_failed");
                return Err(JsonApiError::validation("Không đọc được tệp tải lên."));
            }
        };
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            warn!(err = %e, "multipart_read_failed");
            JsonApiError::validation("Không đọc được tệp tải lên.")
        })?;
        let uploaded = state
            .uploader
            .upload(&file_name, &content_type, bytes.to_vec())
            .await
            .ctx(ErrorContext::Upload)?;
        return Ok(Json(uploaded));
    }
    Err(JsonApiError::validation("Vui lòng chọn ảnh."))
}
