use std::borrow::Cow;

use axum::body::Body;
use axum::extract::Path;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, Response, StatusCode};

/// Release builds carry the assets inside the binary.
#[cfg(not(debug_assertions))]
fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    static ASSETS: include_dir::Dir = include_dir::include_dir!("$CARGO_MANIFEST_DIR/static");
    let file = ASSETS.get_file(path)?;
    Some(Cow::Borrowed(file.contents()))
}

/// Debug builds read from disk every request so stylesheet edits show up on
/// refresh. Paths are relative to the workspace root the server runs from.
#[cfg(debug_assertions)]
fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    let path = std::path::Path::new("./soapbox/static").join(path);
    std::fs::read(path).ok().map(Cow::Owned)
}

pub(crate) async fn static_path(Path(path): Path<String>) -> Response<Body> {
    let path = path.trim_start_matches('/');
    let Some(contents) = load_asset(path) else {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::empty())
            .unwrap();
    };
    let mime_type = mime_guess::from_path(path).first_or_text_plain();
    let cache = if cfg!(debug_assertions) {
        "no-cache"
    } else {
        "max-age=3600"
    };
    Response::builder()
        .status(StatusCode::OK)
        .header(
            CONTENT_TYPE,
            HeaderValue::from_str(mime_type.as_ref()).unwrap(),
        )
        .header(CACHE_CONTROL, HeaderValue::from_static(cache))
        .body(Body::from(contents.into_owned()))
        .unwrap()
}
