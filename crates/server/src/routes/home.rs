use axum::response::Html;

use crate::views;

pub async fn main_page() -> Html<String> {
    Html(views::home())
}
