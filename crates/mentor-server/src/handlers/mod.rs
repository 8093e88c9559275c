pub mod catalog;
pub mod evaluate;

pub async fn health() -> &'static str {
    "OK"
}
