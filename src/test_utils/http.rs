use axum::response::Response;

pub(crate) async fn response_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    String::from_utf8_lossy(&body).into_owned()
}

pub(crate) async fn parse_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&response_text(response).await).expect("Response body is not JSON")
}

#[track_caller]
pub(crate) fn get_header(response: &Response, header_name: &str) -> String {
    response
        .headers()
        .get(header_name)
        .unwrap_or_else(|| panic!("Headers missing {header_name}"))
        .to_str()
        .expect("Header is not valid ASCII")
        .to_owned()
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response, content_type: &str) {
    assert_eq!(get_header(response, "content-type"), content_type);
}

#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response, endpoint: &str) {
    assert_eq!(get_header(response, "hx-redirect"), endpoint);
}
