// Shared test helpers: catalog JSON, listing pages and mock servers.
//
// Used by the integration test files through `mod helpers;`.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use craftrom_bot::Config;

/// The catalog used across scenarios: `onclite` with two releases, a device
/// with a single release and one with none.
pub fn sample_catalog() -> Value {
    json!([
        {
            "codename": "onclite",
            "name": "Redmi 7",
            "brand": "Xiaomi",
            "variants": ["onc", "onclite"],
            "maintainers": ["Alice", "Bob"],
            "supported_versions": [
                {"version_code": "thrall", "stable": true, "deprecated": false},
                {"version_code": "uther", "stable": false, "deprecated": true}
            ]
        },
        {
            "codename": "lavender",
            "name": "Redmi Note 7",
            "brand": "Xiaomi",
            "variants": ["lavender"],
            "maintainers": "Carol",
            "supported_versions": [
                {"version_code": "uther", "stable": true, "deprecated": false}
            ]
        },
        {
            "codename": "ginkgo",
            "name": "Redmi Note 8",
            "brand": "Xiaomi",
            "variants": ["ginkgo", "willow"],
            "maintainers": null,
            "supported_versions": []
        }
    ])
}

/// One listing row in the file-hosting page layout.
pub fn listing_row(name: &str, size: &str, stamp: &str, href: &str) -> String {
    format!(
        r#"<tr class="file">
            <th scope="row" headers="files_name_h"><a href="{href}" class="name"><span class="name">{name}</span></a></th>
            <td headers="files_date_h" class="opt"><abbr title="{stamp}">recent</abbr></td>
            <td headers="files_size_h" class="opt">{size}</td>
        </tr>"#
    )
}

pub fn listing_page(rows: &[String]) -> String {
    format!(
        r#"<html><body><table id="files_list"><tbody>{}</tbody></table></body></html>"#,
        rows.join("\n")
    )
}

/// Serves the sample catalog at `/catalog.json` and returns the server.
pub async fn catalog_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_catalog()))
        .mount(&server)
        .await;
    server
}

pub async fn mount_listing(server: &MockServer, listing_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(listing_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// A configuration whose every remote endpoint points at `server`.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        token: Some("TEST:TOKEN".to_string()),
        catalog_url: format!("{}/catalog.json", server.uri()),
        files_base_url: format!("{}/files", server.uri()),
        device_page_base_url: "https://craftrom.example/devices".to_string(),
        api_base_url: server.uri(),
        timeout_seconds: 5,
        ..Default::default()
    }
}
