//! Tests against the real collection API.
//!
//! These hit the network and are ignored by default. The endpoint can be
//! overridden with a `.env` file in the artic-lib directory:
//!
//! ```env
//! ARTIC_ENDPOINT=https://api.artic.edu/api/v1/artworks
//! ```
//!
//! Then run: `cargo test -p artic-lib -- --ignored`

use std::env;

use artic_lib::config::DEFAULT_ENDPOINT;
use artic_lib::session::{Completion, PageChangeEvent, Session};
use artic_lib::ArticClient;

fn live_client() -> ArticClient {
    let _ = dotenvy::dotenv();
    let endpoint = env::var("ARTIC_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    ArticClient::builder()
        .endpoint(endpoint)
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_fetch_first_page() {
    let client = live_client();

    let page = client.fetch_page(1, 12).await.expect("fetch failed");

    assert_eq!(page.len(), 12);
    assert_eq!(page.page_number(), 1);
    assert!(page.total() > 12);
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_bulk_select_across_pages() {
    let client = live_client();
    let mut session = Session::new();
    session.load_initial(&client).await.expect("initial load failed");
    session
        .load_page(&client, PageChangeEvent::to_page(2, 12))
        .await
        .expect("page change failed");

    let completion = session.select_first(&client, Some(20)).await.unwrap();

    assert_eq!(completion, Completion::Applied);
    assert_eq!(session.total_selected(), 20);
}
