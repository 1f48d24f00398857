use configs::UploadConfig;
use serde_json::json;
use service::upload::ImageUploader;
use service::ServiceError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn uploader(server: &MockServer) -> ImageUploader {
    let cfg = UploadConfig {
        endpoint: format!("{}/v1_1/demo/image/upload", server.uri()),
        upload_preset: Some("spa_admin".into()),
        max_bytes: 1024 * 1024,
    };
    ImageUploader::new(reqwest::Client::new(), cfg)
}

#[tokio::test]
async fn returns_hosted_secure_url() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "public_id": "abc",
            "secure_url": "https://res.cloudinary.com/demo/image/upload/abc.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let img = uploader(&server).upload("abc.png", "image/png", vec![0x89, b'P', b'N', b'G']).await?;
    assert_eq!(img.url, "https://res.cloudinary.com/demo/image/upload/abc.png");
    Ok(())
}

#[tokio::test]
async fn host_rejection_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": { "message": "Invalid image file" } })))
        .mount(&server)
        .await;

    let err = uploader(&server).upload("a.png", "image/png", vec![1, 2, 3]).await.unwrap_err();
    assert!(matches!(err, ServiceError::Api { status: 400, .. }));
}

#[tokio::test]
async fn non_image_is_refused_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let err = uploader(&server).upload("cv.pdf", "application/pdf", vec![1]).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}
