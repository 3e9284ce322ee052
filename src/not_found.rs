//! Defines the route handler for the 404 not found page.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            error_view(
                "Não encontrado",
                "404",
                "A página que você procura não existe.",
                "Verifique o endereço ou volte para a carteira.",
            )
            .into_string(),
        ),
    )
        .into_response()
}
