use pcxpress::constants::defaults;
use pcxpress::mcp::catalog::{
    tool_by_name, tool_catalog, unknown_tool_message, validate_tool_args,
};
use serde_json::json;
use std::collections::HashSet;

const EXPECTED_TOOLS: &[&str] = &[
    "search_past_orders",
    "get_order_items",
    "search_products",
    "get_product_details",
    "add_to_cart",
    "remove_from_cart",
    "view_cart",
];

#[test]
fn catalog_lists_exactly_the_shopping_tools() {
    let names: HashSet<&str> = tool_catalog().iter().map(|t| t.name.as_str()).collect();
    let expected: HashSet<&str> = EXPECTED_TOOLS.iter().copied().collect();
    assert_eq!(names, expected);
}

#[test]
fn every_tool_carries_a_description_and_an_object_schema() {
    for tool in tool_catalog() {
        assert!(!tool.description.is_empty(), "{} has no description", tool.name);
        assert_eq!(
            tool.input_schema["type"], "object",
            "{} schema is not an object schema",
            tool.name
        );
    }
}

#[test]
fn schema_defaults_agree_with_the_dispatch_defaults() {
    let orders = tool_by_name("search_past_orders").unwrap();
    assert_eq!(
        orders.input_schema["properties"]["limit"]["default"],
        defaults::ORDER_LIMIT
    );

    let search = tool_by_name("search_products").unwrap();
    assert_eq!(
        search.input_schema["properties"]["limit"]["default"],
        defaults::SEARCH_LIMIT
    );

    let add = tool_by_name("add_to_cart").unwrap();
    assert_eq!(
        add.input_schema["properties"]["quantity"]["default"],
        defaults::CART_QUANTITY
    );
    assert_eq!(
        add.input_schema["properties"]["fulfillment_method"]["default"],
        defaults::FULFILLMENT_METHOD
    );
}

#[test]
fn missing_required_arguments_are_rejected() {
    let err = validate_tool_args("search_products", &json!({})).unwrap_err();
    assert!(err.message.contains("query"), "got: {}", err.message);

    let err = validate_tool_args("get_order_items", &json!({})).unwrap_err();
    assert!(err.message.contains("order_id"), "got: {}", err.message);
}

#[test]
fn enum_violations_list_the_allowed_values() {
    let err = validate_tool_args(
        "add_to_cart",
        &json!({"product_code": "20039684_EA", "fulfillment_method": "teleport"}),
    )
    .unwrap_err();
    assert!(err.message.contains("pickup"), "got: {}", err.message);
    assert!(err.message.contains("delivery"), "got: {}", err.message);
}

#[test]
fn type_violations_are_rejected() {
    let err = validate_tool_args("search_past_orders", &json!({"limit": "ten"})).unwrap_err();
    assert!(err.message.contains("Invalid arguments"), "got: {}", err.message);
}

#[test]
fn well_formed_arguments_pass() {
    assert!(validate_tool_args("view_cart", &json!({})).is_ok());
    assert!(validate_tool_args("search_products", &json!({"query": "milk"})).is_ok());
    assert!(validate_tool_args(
        "add_to_cart",
        &json!({"product_code": "21657456_EA", "quantity": 2, "fulfillment_method": "delivery"})
    )
    .is_ok());
}

#[test]
fn unknown_tool_messages_suggest_near_misses() {
    let message = unknown_tool_message("search_productz");
    assert!(message.starts_with("Unknown tool: search_productz"));
    assert!(message.contains("search_products"));

    let message = unknown_tool_message("launch_rocket");
    assert_eq!(message, "Unknown tool: launch_rocket");
}
