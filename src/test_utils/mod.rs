#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod sales;

pub(crate) use html::{
    assert_valid_html, parse_html_document, parse_html_fragment, select_all_text, select_text,
};
pub(crate) use http::{assert_content_type, get_header, response_text};
pub(crate) use sales::{StubSalesServer, sales_json, spawn_stub_sales_server, test_sale};
