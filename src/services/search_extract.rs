use serde::Serialize;
use serde_json::Value;

/// One product tile from a search-results listing, flattened for tool
/// consumers. Fields the tile does not carry come through as null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub code: Value,
    pub name: Value,
    pub brand: Value,
    pub description: String,
    pub price: Value,
    pub package_sizing: Value,
    pub link: Value,
    pub offer_type: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: String,
    pub total_results: u64,
    pub products: Vec<ProductSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Pulls product summaries out of the storefront's server-rendered search
/// document. The document shape is not ours; a missing or mis-shaped level
/// degrades to an empty result with `error` set instead of failing the
/// call, since the HTTP request itself already succeeded.
pub fn extract_search_results(query: &str, limit: usize, document: &Value) -> SearchResults {
    match product_tiles(document) {
        Ok((total_results, tiles)) => SearchResults {
            query: query.to_string(),
            total_results,
            products: tiles
                .iter()
                .take(limit)
                .map(|tile| summarize_tile(tile))
                .collect(),
            error: None,
        },
        Err(step) => SearchResults {
            query: query.to_string(),
            total_results: 0,
            products: Vec::new(),
            error: Some(format!("search data missing '{}'", step)),
        },
    }
}

/// Walks `pageProps -> initialSearchData -> layout -> sections ->
/// mainContentCollection -> components` and takes the first component
/// whose data carries product tiles. "Present but wrong shape" counts as
/// absent at every step.
fn product_tiles(document: &Value) -> Result<(u64, Vec<&Value>), &'static str> {
    let page_props = object_step(document, "pageProps")?;
    let search_data = object_step(page_props, "initialSearchData")?;
    let layout = object_step(search_data, "layout")?;
    let sections = object_step(layout, "sections")?;
    let main_content = object_step(sections, "mainContentCollection")?;
    let components = main_content
        .get("components")
        .and_then(Value::as_array)
        .ok_or("mainContentCollection.components")?;

    let total_results = search_data
        .get("searchResultsCount")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    // A nested document with no tile component is an empty result, not an
    // extraction failure.
    let tiles = components
        .iter()
        .find_map(|component| {
            component
                .get("data")
                .and_then(|data| data.get("productTiles"))
                .and_then(Value::as_array)
        })
        .map(|tiles| tiles.iter().collect())
        .unwrap_or_default();

    Ok((total_results, tiles))
}

fn object_step<'a>(parent: &'a Value, key: &'static str) -> Result<&'a Value, &'static str> {
    parent.get(key).filter(|value| value.is_object()).ok_or(key)
}

fn summarize_tile(tile: &Value) -> ProductSummary {
    let description = tile
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .replace("<br/>", " ");
    ProductSummary {
        code: field(tile, "articleNumber"),
        name: field(tile, "title"),
        brand: field(tile, "brand"),
        description,
        price: tile
            .get("pricing")
            .and_then(|pricing| pricing.get("price"))
            .cloned()
            .unwrap_or(Value::Null),
        package_sizing: field(tile, "packageSizing"),
        link: field(tile, "link"),
        offer_type: field(tile, "offerType"),
    }
}

fn field(tile: &Value, key: &str) -> Value {
    tile.get(key).cloned().unwrap_or(Value::Null)
}
