//! One-shot HAR scanner: pulls PC Express session credentials out of a
//! browser network capture and writes them as a `.env` file for the server.
//! Never invoked at runtime; tokens expire within hours and must be
//! re-extracted by hand.

use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;

const API_HOST: &str = "api.pcexpress.ca";

// Store id placeholder when the capture carries none. Distinct from the
// server's runtime default on purpose: this one marks "fill me in".
const STORE_ID_PLACEHOLDER: &str = "0000";

static CART_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/carts/([a-f0-9\-]{36})").expect("cart id pattern"));
static CUSTOMER_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/customers/([a-f0-9\-]{36})").expect("customer id pattern"));
static STORE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"storeId=(\d+)").expect("store id pattern"));

#[derive(Parser)]
#[command(
    name = "pcx-extract-credentials",
    about = "Extract PC Express credentials from a browser HAR capture"
)]
struct Args {
    /// HAR file exported from the browser's network panel
    har_file: PathBuf,

    /// Where to write the generated env file
    #[arg(long, default_value = ".env")]
    out: PathBuf,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Default)]
struct Credentials {
    bearer_token: Option<String>,
    customer_id: Option<String>,
    cart_id: Option<String>,
    store_id: Option<String>,
}

fn main() {
    let args = Args::parse();

    let raw = match std::fs::read_to_string(&args.har_file) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("cannot read {}: {}", args.har_file.display(), err);
            std::process::exit(1);
        }
    };
    let har: Value = match serde_json::from_str(&raw) {
        Ok(har) => har,
        Err(err) => {
            eprintln!("{} is not valid HAR JSON: {}", args.har_file.display(), err);
            std::process::exit(1);
        }
    };

    let mut credentials = scan_har(&har);
    if credentials.store_id.is_none() {
        credentials.store_id = Some(STORE_ID_PLACEHOLDER.to_string());
    }

    print_summary(&credentials);

    if args.out.exists() && !args.force {
        eprintln!(
            "{} already exists; pass --force to overwrite",
            args.out.display()
        );
        std::process::exit(1);
    }
    if let Err(err) = std::fs::write(&args.out, render_env(&credentials)) {
        eprintln!("cannot write {}: {}", args.out.display(), err);
        std::process::exit(1);
    }
    println!("credentials written to {}", args.out.display());
    println!("note: bearer tokens expire within hours; re-run this tool when calls start failing with 401");
}

/// First match wins for every field, scanning capture order. Only traffic
/// to the API host is considered.
fn scan_har(har: &Value) -> Credentials {
    let mut credentials = Credentials::default();
    let entries = har
        .get("log")
        .and_then(|log| log.get("entries"))
        .and_then(Value::as_array);

    for entry in entries.into_iter().flatten() {
        let request = entry.get("request");
        let url = request
            .and_then(|r| r.get("url"))
            .and_then(Value::as_str)
            .unwrap_or("");
        if !url.contains(API_HOST) {
            continue;
        }

        if credentials.bearer_token.is_none() {
            credentials.bearer_token = bearer_from_headers(request);
        }
        if credentials.cart_id.is_none() {
            credentials.cart_id = capture_group(&CART_ID_PATTERN, url);
        }
        if credentials.customer_id.is_none() {
            credentials.customer_id = capture_group(&CUSTOMER_ID_PATTERN, url);
        }
        if credentials.store_id.is_none() {
            credentials.store_id = capture_group(&STORE_ID_PATTERN, url)
                .or_else(|| store_id_from_post_body(request));
        }
    }
    credentials
}

fn bearer_from_headers(request: Option<&Value>) -> Option<String> {
    let headers = request?.get("headers")?.as_array()?;
    headers.iter().find_map(|header| {
        let name = header.get("name")?.as_str()?;
        let value = header.get("value")?.as_str()?;
        if name.eq_ignore_ascii_case("authorization") && value.contains("Bearer") {
            Some(value.replace("Bearer ", "").trim().to_string())
        } else {
            None
        }
    })
}

fn store_id_from_post_body(request: Option<&Value>) -> Option<String> {
    let text = request?
        .get("postData")?
        .get("text")?
        .as_str()
        .filter(|text| text.contains("storeId"))?;
    let body: Value = serde_json::from_str(text).ok()?;
    let store_id = body.get("storeId")?;
    Some(
        store_id
            .as_str()
            .map(String::from)
            .unwrap_or_else(|| store_id.to_string()),
    )
}

fn capture_group(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

fn print_summary(credentials: &Credentials) {
    let rows = [
        ("bearer_token", &credentials.bearer_token),
        ("customer_id", &credentials.customer_id),
        ("cart_id", &credentials.cart_id),
        ("store_id", &credentials.store_id),
    ];
    for (label, value) in rows {
        match value {
            Some(value) => println!("{}: {}", label, shorten(value)),
            None => println!("{}: NOT FOUND", label),
        }
    }
    if credentials.bearer_token.is_none()
        || credentials.customer_id.is_none()
        || credentials.cart_id.is_none()
    {
        eprintln!(
            "warning: capture is missing fields; it must include authenticated cart and account requests to {}",
            API_HOST
        );
    }
}

fn shorten(value: &str) -> String {
    if value.len() <= 50 {
        return value.to_string();
    }
    format!("{}...{}", &value[..30], &value[value.len() - 20..])
}

fn render_env(credentials: &Credentials) -> String {
    format!(
        "# PC Express MCP server configuration (generated from a HAR capture)\n\n\
         PCEXPRESS_BEARER_TOKEN={}\n\
         PCEXPRESS_CUSTOMER_ID={}\n\
         PCEXPRESS_CART_ID={}\n\
         PCEXPRESS_STORE_ID={}\n",
        credentials.bearer_token.as_deref().unwrap_or("YOUR_TOKEN_HERE"),
        credentials.customer_id.as_deref().unwrap_or("YOUR_CUSTOMER_ID_HERE"),
        credentials.cart_id.as_deref().unwrap_or("YOUR_CART_ID_HERE"),
        credentials.store_id.as_deref().unwrap_or(STORE_ID_PLACEHOLDER),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_har() -> Value {
        serde_json::json!({
            "log": {
                "entries": [
                    {
                        "request": {
                            "url": "https://www.zehrs.ca/en",
                            "headers": [{"name": "Authorization", "value": "Bearer decoy"}]
                        }
                    },
                    {
                        "request": {
                            "url": "https://api.pcexpress.ca/pcx-bff/api/v1/carts/0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9?storeId=2861",
                            "headers": [
                                {"name": "accept", "value": "application/json"},
                                {"name": "authorization", "value": "Bearer tok-abc123"}
                            ]
                        }
                    },
                    {
                        "request": {
                            "url": "https://api.pcexpress.ca/pcx-bff/api/v1/ecommerce/v2/zehrs/customers/ffeeddcc-bbaa-9988-7766-554433221100/profile",
                            "headers": []
                        }
                    }
                ]
            }
        })
    }

    #[test]
    fn scan_pulls_every_field_from_api_traffic_only() {
        let credentials = scan_har(&sample_har());
        assert_eq!(credentials.bearer_token.as_deref(), Some("tok-abc123"));
        assert_eq!(
            credentials.cart_id.as_deref(),
            Some("0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9")
        );
        assert_eq!(
            credentials.customer_id.as_deref(),
            Some("ffeeddcc-bbaa-9988-7766-554433221100")
        );
        assert_eq!(credentials.store_id.as_deref(), Some("2861"));
    }

    #[test]
    fn store_id_falls_back_to_post_body() {
        let har = serde_json::json!({
            "log": {"entries": [{
                "request": {
                    "url": "https://api.pcexpress.ca/pcx-bff/api/v1/checkout",
                    "headers": [],
                    "postData": {"text": "{\"storeId\": 1077}"}
                }
            }]}
        });
        assert_eq!(scan_har(&har).store_id.as_deref(), Some("1077"));
    }

    #[test]
    fn env_rendering_uses_placeholders_for_missing_fields() {
        let rendered = render_env(&Credentials::default());
        assert!(rendered.contains("PCEXPRESS_BEARER_TOKEN=YOUR_TOKEN_HERE"));
        assert!(rendered.contains("PCEXPRESS_STORE_ID=0000"));
    }
}
