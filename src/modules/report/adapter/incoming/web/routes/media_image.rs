use std::io::ErrorKind;
use std::path::{Component, Path};

use actix_web::{get, web, HttpResponse, Responder};
use tracing::{error, warn};

use crate::{shared::api::ApiResponse, AppState};

/// A relative path below the photo folder: `/`-separated plain names only.
/// Rejects `..`, `.`, empty segments, backslashes, roots and hidden entries.
fn is_safe_media_path(path: &str) -> bool {
    if path.is_empty() || path.contains('\\') {
        return false;
    }
    path.split('/').all(|segment| {
        if segment.is_empty() || segment.starts_with('.') {
            return false;
        }
        let mut components = Path::new(segment).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    })
}

fn content_type(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

fn image_not_found() -> HttpResponse {
    ApiResponse::not_found("IMAGE_NOT_FOUND", "图片不存在")
}

/// Activity photos referenced by report records as `/media/images/{path}`,
/// subfolders included.
#[get("/media/images/{filename:.*}")]
pub async fn media_image_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let filename = path.into_inner();
    if !is_safe_media_path(&filename) {
        warn!(filename = %filename, "Rejected media path");
        return image_not_found();
    }

    match tokio::fs::read(data.photo_folder.join(&filename)).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(content_type(&filename))
            .body(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => image_not_found(),
        Err(e) => {
            error!(error = %e, filename = %filename, "Failed to read media file");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};

    #[::core::prelude::v1::test]
    fn only_relative_paths_below_the_folder_are_served() {
        assert!(is_safe_media_path("read.jpg"));
        assert!(is_safe_media_path("“书香传情”.jpg"));
        assert!(is_safe_media_path("2024/春季/read.jpg"));
        assert!(!is_safe_media_path(".."));
        assert!(!is_safe_media_path("../secret.txt"));
        assert!(!is_safe_media_path("2024/../../secret.txt"));
        assert!(!is_safe_media_path("2024/./read.jpg"));
        assert!(!is_safe_media_path("2024//read.jpg"));
        assert!(!is_safe_media_path("/etc/passwd"));
        assert!(!is_safe_media_path("2024/"));
        assert!(!is_safe_media_path("..\\b.jpg"));
        assert!(!is_safe_media_path(".env"));
        assert!(!is_safe_media_path(""));
    }

    #[::core::prelude::v1::test]
    fn content_type_follows_extension() {
        assert_eq!(content_type("a.JPG"), "image/jpeg");
        assert_eq!(content_type("a.png"), "image/png");
        assert_eq!(content_type("a"), "application/octet-stream");
    }

    #[actix_web::test]
    async fn serves_existing_photo_with_content_type() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("read.png"), [0x89, b'P', b'N', b'G']).unwrap();
        let state = TestAppStateBuilder::default()
            .with_photo_folder(dir.path())
            .build();
        let app = test::init_service(App::new().app_data(state).service(media_image_handler)).await;

        // Act
        let req = test::TestRequest::get().uri("/media/images/read.png").to_request();
        let resp = test::call_service(&app, req).await;

        // Assert
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap().to_str().unwrap(),
            "image/png"
        );
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], &[0x89, b'P', b'N', b'G']);
    }

    #[actix_web::test]
    async fn serves_photo_from_a_subfolder() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("2024").join("spring")).unwrap();
        std::fs::write(dir.path().join("2024/spring/read.jpg"), b"jpeg").unwrap();
        let state = TestAppStateBuilder::default()
            .with_photo_folder(dir.path())
            .build();
        let app = test::init_service(App::new().app_data(state).service(media_image_handler)).await;

        // Act
        let req = test::TestRequest::get()
            .uri("/media/images/2024/spring/read.jpg")
            .to_request();
        let resp = test::call_service(&app, req).await;

        // Assert
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap().to_str().unwrap(),
            "image/jpeg"
        );
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], b"jpeg");
    }

    #[actix_web::test]
    async fn missing_and_escaping_paths_return_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let photos = dir.path().join("photos");
        std::fs::create_dir(&photos).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
        let state = TestAppStateBuilder::default()
            .with_photo_folder(&photos)
            .build();
        let app = test::init_service(App::new().app_data(state).service(media_image_handler)).await;

        for uri in [
            "/media/images/absent.jpg",
            "/media/images/..%2Fsecret.txt",
            "/media/images/%2E%2E",
            "/media/images/sub/..%2F..%2Fsecret.txt",
            "/media/images/sub/%2E%2E/%2E%2E/secret.txt",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }
}
