use crate::constants::defaults;
use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::services::pcx_client::PcxClient;
use serde_json::Value;
use std::sync::Arc;

/// Maps catalog tool names onto backend client calls: applies argument
/// defaults, issues exactly one backend operation per invocation, and
/// shapes the result for the protocol layer.
pub struct ShoppingManager {
    logger: Logger,
    client: Arc<PcxClient>,
}

impl ShoppingManager {
    pub fn new(logger: Logger, client: Arc<PcxClient>) -> Self {
        Self {
            logger: logger.child("shopping"),
            client,
        }
    }

    pub async fn handle_tool(&self, name: &str, args: &Value) -> Result<Value, ToolError> {
        self.logger.debug("tool call", Some(&serde_json::json!({"tool": name})));
        match name {
            "search_past_orders" => self.search_past_orders(args).await,
            "get_order_items" => self.get_order_items(args).await,
            "search_products" => self.search_products(args).await,
            "get_product_details" => self.get_product_details(args).await,
            "add_to_cart" => self.add_to_cart(args).await,
            "remove_from_cart" => self.remove_from_cart(args).await,
            "view_cart" => self.client.cart().await,
            _ => Err(ToolError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    async fn search_past_orders(&self, args: &Value) -> Result<Value, ToolError> {
        let limit = number_arg(args, "limit")
            .map(|n| n.max(0) as usize)
            .unwrap_or(defaults::ORDER_LIMIT);
        let result = self.client.historical_orders().await?;
        Ok(truncate_order_history(&result, limit))
    }

    async fn get_order_items(&self, args: &Value) -> Result<Value, ToolError> {
        let order_id = required_str(args, "order_id")?;
        self.client.order_details(&order_id).await
    }

    async fn search_products(&self, args: &Value) -> Result<Value, ToolError> {
        let query = required_str(args, "query")?;
        let limit = number_arg(args, "limit")
            .map(|n| n.max(0) as usize)
            .unwrap_or(defaults::SEARCH_LIMIT);
        let results = self.client.search_products(&query, limit).await?;
        serde_json::to_value(results)
            .map_err(|err| ToolError::parse(format!("failed to serialize search results: {}", err)))
    }

    async fn get_product_details(&self, args: &Value) -> Result<Value, ToolError> {
        let product_code = required_str(args, "product_code")?;
        self.client.product_details(&product_code).await
    }

    async fn add_to_cart(&self, args: &Value) -> Result<Value, ToolError> {
        let product_code = required_str(args, "product_code")?;
        let quantity = number_arg(args, "quantity").unwrap_or(defaults::CART_QUANTITY);
        let fulfillment_method = args
            .get("fulfillment_method")
            .and_then(Value::as_str)
            .unwrap_or(defaults::FULFILLMENT_METHOD);
        self.client
            .set_cart_entry(&product_code, quantity, fulfillment_method)
            .await
    }

    async fn remove_from_cart(&self, args: &Value) -> Result<Value, ToolError> {
        let product_code = required_str(args, "product_code")?;
        self.client.remove_cart_entry(&product_code).await
    }
}

/// The backend has no limit parameter on order history, so the list is cut
/// client-side. Online/offline counts pass through untouched.
fn truncate_order_history(result: &Value, limit: usize) -> Value {
    let orders: Vec<Value> = result
        .get("orderHistory")
        .and_then(Value::as_array)
        .map(|orders| orders.iter().take(limit).cloned().collect())
        .unwrap_or_default();
    serde_json::json!({
        "orders": orders,
        "totalOnlineOrders": result.get("onlineOrdersCount").cloned().unwrap_or(Value::Null),
        "totalOfflineOrders": result.get("offlineOrdersCount").cloned().unwrap_or(Value::Null),
    })
}

fn required_str(args: &Value, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .ok_or_else(|| ToolError::invalid_params(format!("{} is required", key)))
}

fn number_arg(args: &Value, key: &str) -> Option<i64> {
    let value = args.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|float| float as i64))
}
