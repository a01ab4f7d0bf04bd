use crate::config::ClientConfig;
use crate::constants::{api, defaults, network};
use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::services::search_extract::{extract_search_results, SearchResults};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER,
    USER_AGENT,
};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

static BUILD_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"buildId":"([^"]+)""#).expect("build id pattern"));

const BODY_SNIPPET_LEN: usize = 512;

/// Authenticated client for the PC Express backend. One instance per
/// process; holds no mutable state beyond the connection pool.
#[derive(Clone)]
pub struct PcxClient {
    logger: Logger,
    config: ClientConfig,
    client: Client,
}

impl PcxClient {
    pub fn new(logger: Logger, config: ClientConfig) -> Self {
        let client = Client::builder()
            .gzip(true)
            .build()
            .expect("reqwest client");
        Self {
            logger: logger.child("pcx"),
            config,
            client,
        }
    }

    /// Header set the REST surface requires verbatim; requests missing any
    /// of these are rejected upstream.
    fn standard_headers(&self) -> HeaderMap {
        let domain = self.config.domain();
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.config.bearer_token)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            "Business-User-Agent",
            HeaderValue::from_static(api::BUSINESS_USER_AGENT),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&format!("https://{}", domain)) {
            headers.insert(ORIGIN, value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("https://{}/", domain)) {
            headers.insert(REFERER, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.config.banner) {
            headers.insert("Site-Banner", value.clone());
            headers.insert("baseSiteId", value);
        }
        headers.insert("x-apikey", HeaderValue::from_static(api::API_KEY));
        headers.insert(
            "x-application-type",
            HeaderValue::from_static(api::APPLICATION_TYPE),
        );
        headers.insert(
            "x-loblaw-tenant-id",
            HeaderValue::from_static(api::TENANT_ID),
        );
        headers.insert("is-helios-account", HeaderValue::from_static("true"));
        headers
    }

    /// Minimal browser-identifying set for the storefront page and its
    /// build-scoped data endpoint.
    fn browser_headers(accept_json: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(api::BROWSER_USER_AGENT),
        );
        if accept_json {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        headers
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ToolError> {
        let response = tokio::time::timeout(
            Duration::from_millis(network::TIMEOUT_API_REQUEST_MS),
            request.send(),
        )
        .await
        .map_err(|_| ToolError::transport("upstream request timed out"))?
        .map_err(|err| ToolError::transport(format!("upstream request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            self.logger.warn(
                "upstream error",
                Some(&serde_json::json!({"status": status.as_u16()})),
            );
            return Err(http_error(status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn request_json(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        query: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> Result<Value, ToolError> {
        self.logger
            .debug("request", Some(&serde_json::json!({"method": method.as_str(), "url": url})));
        let mut request = self.client.request(method, url).headers(headers);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(request).await?;
        let text = response
            .text()
            .await
            .map_err(|err| ToolError::transport(format!("failed to read upstream body: {}", err)))?;
        serde_json::from_str(&text)
            .map_err(|err| ToolError::parse(format!("upstream returned invalid JSON: {}", err)))
    }

    pub async fn historical_orders(&self) -> Result<Value, ToolError> {
        let url = format!(
            "{}/ecommerce/v2/{}/customers/historical-orders",
            api::BASE_URL,
            self.config.banner
        );
        self.request_json(Method::GET, &url, self.standard_headers(), None, None)
            .await
    }

    pub async fn order_details(&self, order_id: &str) -> Result<Value, ToolError> {
        let url = format!(
            "{}/ecommerce/v2/{}/customers/historical-orders/{}",
            api::BASE_URL,
            self.config.banner,
            order_id
        );
        self.request_json(Method::GET, &url, self.standard_headers(), None, None)
            .await
    }

    /// The storefront embeds its current build id in the rendered homepage;
    /// data endpoints are addressed per build.
    async fn fetch_build_id(&self) -> Result<String, ToolError> {
        let url = format!("https://{}/en", self.config.domain());
        let request = self.client.get(&url).headers(Self::browser_headers(false));
        let response = self.send(request).await?;
        let html = response
            .text()
            .await
            .map_err(|err| ToolError::transport(format!("failed to read storefront page: {}", err)))?;
        BUILD_ID_PATTERN
            .captures(&html)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ToolError::parse("could not extract build id from storefront page"))
    }

    pub async fn search_products(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<SearchResults, ToolError> {
        let build_id = self.fetch_build_id().await?;
        let url = format!(
            "https://{}/_next/data/{}/en/search.json",
            self.config.domain(),
            build_id
        );
        let params = [
            ("search-bar", query),
            ("storeId", self.config.store_id.as_str()),
            ("cartId", self.config.cart_id.as_str()),
        ];
        let document = self
            .request_json(
                Method::GET,
                &url,
                Self::browser_headers(true),
                Some(&params),
                None,
            )
            .await?;
        Ok(extract_search_results(query, limit, &document))
    }

    pub async fn product_details(&self, product_code: &str) -> Result<Value, ToolError> {
        let url = format!("{}/products/{}", api::BASE_URL, product_code);
        self.request_json(Method::GET, &url, self.standard_headers(), None, None)
            .await
    }

    pub async fn cart(&self) -> Result<Value, ToolError> {
        let url = format!("{}/carts/{}", api::BASE_URL, self.config.cart_id);
        self.request_json(Method::GET, &url, self.standard_headers(), None, None)
            .await
    }

    /// Sets a product's quantity in the cart. Quantity 0 removes the line;
    /// there is no separate removal endpoint upstream.
    pub async fn set_cart_entry(
        &self,
        product_code: &str,
        quantity: i64,
        fulfillment_method: &str,
    ) -> Result<Value, ToolError> {
        let url = format!("{}/carts/{}", api::BASE_URL, self.config.cart_id);
        let body = cart_entry_body(
            product_code,
            quantity,
            fulfillment_method,
            &self.config.store_id,
        );
        self.request_json(
            Method::POST,
            &url,
            self.standard_headers(),
            Some(&[("inventory", "true")]),
            Some(&body),
        )
        .await
    }

    pub async fn remove_cart_entry(&self, product_code: &str) -> Result<Value, ToolError> {
        self.set_cart_entry(product_code, 0, defaults::FULFILLMENT_METHOD)
            .await
    }
}

fn http_error(status: u16, body: &str) -> ToolError {
    let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
    let message = if snippet.trim().is_empty() {
        format!("upstream request failed ({})", status)
    } else {
        format!("upstream request failed ({}): {}", status, snippet)
    };
    ToolError::http(status, message)
}

fn cart_entry_body(
    product_code: &str,
    quantity: i64,
    fulfillment_method: &str,
    store_id: &str,
) -> Value {
    serde_json::json!({
        "entries": {
            product_code: {
                "quantity": quantity,
                "fulfillmentMethod": fulfillment_method,
                "sellerId": store_id,
            }
        }
    })
}
