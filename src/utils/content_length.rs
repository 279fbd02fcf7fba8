//! Content length extraction utilities.

use reqwest::header::{HeaderMap, CONTENT_LENGTH};
use reqwest::Response;

/// Expected body length of a response, if the server announced one.
///
/// Reads the `Content-Length` header rather than [`Response::content_length`],
/// which reports the size hint of the body and may be absent or differ for
/// chunked responses.
///
/// # Example
///
/// ```rust,no_run
/// use sfxdl::utils::expected_length;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let response = reqwest::get("https://gdcolon.com/server/soundlist").await?;
/// println!("{:?}", expected_length(&response));
/// # Ok(())
/// # }
/// ```
pub fn expected_length(response: &Response) -> Option<u64> {
    parse_content_length(response.headers())
}

/// Parse the `Content-Length` header of `headers`.
///
/// Returns `None` if the header is missing, repeated with different values,
/// or not a decimal `u64`.
///
/// ```rust
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
/// use sfxdl::utils::parse_content_length;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(parse_content_length(&headers), Some(2048));
/// ```
pub fn parse_content_length(headers: &HeaderMap) -> Option<u64> {
    let mut values = headers
        .get_all(CONTENT_LENGTH)
        .iter()
        .map(|v| v.to_str().ok().and_then(|s| s.trim().parse::<u64>().ok()));

    let first = values.next()??;
    if values.all(|v| v == Some(first)) {
        Some(first)
    } else {
        None
    }
}
