use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

use crate::test_utils::response_text;

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&response_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// The trimmed text of the first element matching `selector`.
#[track_caller]
pub(crate) fn select_text(html: &Html, selector: &str) -> String {
    let parsed = Selector::parse(selector).unwrap();

    html.select(&parsed)
        .next()
        .unwrap_or_else(|| panic!("No element matching {selector:?} in {}", html.html()))
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}

/// The trimmed text of every element matching `selector`.
pub(crate) fn select_all_text(html: &Html, selector: &str) -> Vec<String> {
    let parsed = Selector::parse(selector).unwrap();

    html.select(&parsed)
        .map(|element| element.text().collect::<String>().trim().to_owned())
        .collect()
}
