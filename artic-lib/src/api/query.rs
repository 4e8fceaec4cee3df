//! Page request URL construction.

use url::Url;

use crate::error::ApiError;

/// Fields requested for every artwork.
pub const FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// Builds the URL for one page of artworks.
///
/// Existing query parameters on the endpoint are kept; `page`, `limit` and
/// `fields` are appended.
pub fn page_url(endpoint: &Url, page: u32, limit: u32) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string())
        .append_pair("fields", &FIELDS.join(","));
    url
}

/// Parses an endpoint URL, rejecting relative or non-HTTP(S) URLs.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, ApiError> {
    let url = Url::parse(endpoint).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            endpoint, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        let endpoint = parse_endpoint("https://api.artic.edu/api/v1/artworks").unwrap();
        assert_eq!(
            page_url(&endpoint, 3, 12).as_str(),
            "https://api.artic.edu/api/v1/artworks?page=3&limit=12\
             &fields=id%2Ctitle%2Cplace_of_origin%2Cartist_display%2Cinscriptions%2Cdate_start%2Cdate_end"
        );
    }

    #[test]
    fn test_page_url_keeps_existing_query() {
        let endpoint = parse_endpoint("http://localhost:8080/artworks?lang=en").unwrap();
        let url = page_url(&endpoint, 1, 25);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("lang".to_string(), "en".to_string()));
        assert_eq!(pairs[1], ("page".to_string(), "1".to_string()));
        assert_eq!(pairs[2], ("limit".to_string(), "25".to_string()));
    }

    #[test]
    fn test_parse_endpoint_rejects_bad_urls() {
        assert!(matches!(parse_endpoint("not a url"), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(
            parse_endpoint("ftp://example.com/artworks"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
