/// Failure to obtain product data from the store API
///
/// This is the only error kind the product pipeline knows about. It is caught
/// where the fetch is issued and never changes the collection state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed payload from {url}: {message}")]
    Malformed { url: String, message: String },
}
