use pcxpress::services::search_extract::extract_search_results;
use serde_json::{json, Value};

fn tile(code: &str, description: &str) -> Value {
    json!({
        "articleNumber": code,
        "title": format!("Product {}", code),
        "brand": "PC",
        "description": description,
        "pricing": {"price": 4.29},
        "packageSizing": "1 L",
        "link": format!("/p/{}", code),
        "offerType": "SELL"
    })
}

fn search_document(tiles: Vec<Value>, count: u64) -> Value {
    json!({
        "pageProps": {
            "initialSearchData": {
                "searchResultsCount": count,
                "layout": {
                    "sections": {
                        "mainContentCollection": {
                            "components": [
                                {"data": {"heroBanner": "seasonal"}},
                                {"data": {"productTiles": tiles}}
                            ]
                        }
                    }
                }
            }
        }
    })
}

#[test]
fn extraction_caps_at_the_requested_limit_preserving_order() {
    let tiles = (1..=5).map(|i| tile(&format!("t{}", i), "plain")).collect();
    let document = search_document(tiles, 152);

    let results = extract_search_results("milk", 3, &document);
    assert!(results.error.is_none());
    assert_eq!(results.total_results, 152);
    assert_eq!(results.products.len(), 3);
    let codes: Vec<&str> = results
        .products
        .iter()
        .map(|p| p.code.as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["t1", "t2", "t3"]);
}

#[test]
fn a_limit_beyond_the_tile_count_returns_every_tile() {
    let tiles = (1..=2).map(|i| tile(&format!("t{}", i), "plain")).collect();
    let results = extract_search_results("milk", 48, &search_document(tiles, 2));
    assert_eq!(results.products.len(), 2);
}

#[test]
fn html_line_breaks_in_descriptions_become_spaces() {
    let tiles = vec![tile("t1", "Chocolate<br/>Vanilla<br/>Swirl")];
    let results = extract_search_results("ice cream", 7, &search_document(tiles, 1));
    assert_eq!(results.products[0].description, "Chocolate Vanilla Swirl");
}

#[test]
fn sparse_tiles_come_through_with_null_fields() {
    let tiles = vec![json!({"articleNumber": "t9"})];
    let results = extract_search_results("bread", 7, &search_document(tiles, 1));
    let product = &results.products[0];
    assert_eq!(product.code.as_str(), Some("t9"));
    assert!(product.name.is_null());
    assert!(product.brand.is_null());
    assert!(product.price.is_null());
    assert_eq!(product.description, "");
}

#[test]
fn each_missing_nesting_level_degrades_to_an_error_field() {
    let broken_documents = vec![
        json!({}),
        json!({"pageProps": "not an object"}),
        json!({"pageProps": {"initialSearchData": 7}}),
        json!({"pageProps": {"initialSearchData": {"layout": {}}}}),
        json!({"pageProps": {"initialSearchData": {"layout": {"sections": {
            "mainContentCollection": {}
        }}}}}),
        json!({"pageProps": {"initialSearchData": {"layout": {"sections": {
            "mainContentCollection": {"components": {"not": "an array"}}
        }}}}}),
    ];
    for document in broken_documents {
        let results = extract_search_results("milk", 7, &document);
        assert!(results.error.is_some(), "document {:?} must set error", document);
        assert_eq!(results.total_results, 0);
        assert!(results.products.is_empty());
    }
}

#[test]
fn a_well_nested_document_without_tiles_is_an_empty_result_not_an_error() {
    let document = json!({
        "pageProps": {
            "initialSearchData": {
                "searchResultsCount": 0,
                "layout": {
                    "sections": {
                        "mainContentCollection": {
                            "components": [{"data": {"heroBanner": "seasonal"}}]
                        }
                    }
                }
            }
        }
    });
    let results = extract_search_results("unicorn fruit", 7, &document);
    assert!(results.error.is_none());
    assert!(results.products.is_empty());
}

#[test]
fn an_absent_result_count_reads_as_zero() {
    let mut document = search_document(vec![tile("t1", "plain")], 0);
    document["pageProps"]["initialSearchData"]
        .as_object_mut()
        .unwrap()
        .remove("searchResultsCount");
    let results = extract_search_results("milk", 7, &document);
    assert_eq!(results.total_results, 0);
    assert_eq!(results.products.len(), 1);
}

#[test]
fn serialized_results_use_the_wire_field_names() {
    let tiles = vec![tile("t1", "plain")];
    let results = extract_search_results("milk", 7, &search_document(tiles, 1));
    let rendered = serde_json::to_value(&results).unwrap();
    assert_eq!(rendered["query"], "milk");
    assert_eq!(rendered["totalResults"], 1);
    assert_eq!(rendered["products"][0]["packageSizing"], "1 L");
    assert_eq!(rendered["products"][0]["offerType"], "SELL");
    assert!(rendered.get("error").is_none());
}
