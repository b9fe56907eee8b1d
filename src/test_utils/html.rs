use axum::response::Response;
use scraper::Html;

use super::http::response_text;

pub(crate) async fn parse_html_document(response: Response) -> Html {
    Html::parse_document(&response_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(html.errors.is_empty(), "Got HTML parsing errors: {:?}", html.errors);
}
