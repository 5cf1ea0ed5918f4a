use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    /// The server rejected the request and explained why in its `message`
    /// field. The text is shown to the user verbatim.
    #[error("{message}")]
    Rejected { message: String },
    #[error("ResponseError: {0}")]
    Response(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
}
