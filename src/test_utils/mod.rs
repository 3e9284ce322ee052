#![allow(missing_docs)]

pub(crate) mod api;
pub(crate) mod html;

pub(crate) use api::{StubWalletApi, new_test_state};
pub(crate) use html::{assert_valid_html, parse_html_document};
