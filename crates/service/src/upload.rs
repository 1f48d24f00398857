//! Image hosting for service and staff photos.
//!
//! Files are forwarded as multipart to a third-party endpoint (Cloudinary-style
//! unsigned preset); only the returned public URL is kept on the record.

use configs::UploadConfig;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::client::extract_detail;
use crate::errors::{ServiceError, UPLOAD_DISABLED_MESSAGE};
use crate::observability::IMAGE_UPLOADS_TOTAL;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedImage {
    pub url: String,
}

#[derive(Clone)]
pub struct ImageUploader {
    http: reqwest::Client,
    cfg: UploadConfig,
}

impl ImageUploader {
    pub fn new(http: reqwest::Client, cfg: UploadConfig) -> Self {
        Self { http, cfg }
    }

    /// Size/type checks done before anything is sent.
    pub fn check(&self, content_type: &str, len: usize) -> Result<(), ServiceError> {
        if !self.cfg.enabled() {
            return Err(ServiceError::Unavailable(UPLOAD_DISABLED_MESSAGE.into()));
        }
        if len == 0 {
            return Err(ServiceError::Validation("Vui lòng chọn ảnh.".into()));
        }
        if !content_type.to_ascii_lowercase().starts_with("image/") {
            return Err(ServiceError::Validation("Chỉ chấp nhận tệp ảnh (jpg, png, webp...).".into()));
        }
        if len > self.cfg.max_bytes {
            let mb = self.cfg.max_bytes as f64 / (1024.0 * 1024.0);
            return Err(ServiceError::Validation(format!("Ảnh vượt quá dung lượng cho phép ({mb:.0} MB).")));
        }
        Ok(())
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<UploadedImage, ServiceError> {
        self.check(content_type, bytes.len())?;

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|_| ServiceError::Validation("Định dạng ảnh không hợp lệ.".into()))?;
        let mut form = Form::new().part("file", part);
        if let Some(preset) = &self.cfg.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }

        let resp = self.http.post(&self.cfg.endpoint).multipart(form).send().await.map_err(|e| {
            IMAGE_UPLOADS_TOTAL.with_label_values(&["network_error"]).inc();
            ServiceError::Network(e.to_string())
        })?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            IMAGE_UPLOADS_TOTAL.with_label_values(&["rejected"]).inc();
            warn!(status = status.as_u16(), "image_upload_rejected");
            return Err(ServiceError::Api { status: status.as_u16(), detail: extract_detail(&text) });
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| ServiceError::Decode(e.to_string()))?;
        let url = hosted_url(&body).ok_or_else(|| ServiceError::Decode("upload response without url".into()))?;
        IMAGE_UPLOADS_TOTAL.with_label_values(&["ok"]).inc();
        info!(%url, "image_uploaded");
        Ok(UploadedImage { url })
    }
}

/// `secure_url` (Cloudinary), `url`, or the same under `data` (imgbb-style).
fn hosted_url(body: &Value) -> Option<String> {
    let pick = |v: &Value| {
        ["secure_url", "url", "display_url"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str))
            .map(str::to_string)
    };
    pick(body).or_else(|| body.get("data").and_then(pick))
}
