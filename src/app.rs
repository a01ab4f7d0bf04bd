use crate::config::ClientConfig;
use crate::errors::ToolError;
use crate::managers::shopping::ShoppingManager;
use crate::services::logger::Logger;
use crate::services::pcx_client::PcxClient;
use std::sync::Arc;

/// Process wiring. Configuration is validated and the backend client built
/// exactly once, before the server accepts its first request; missing
/// credentials abort startup instead of failing per call.
pub struct App {
    pub logger: Logger,
    pub shopping: ShoppingManager,
}

impl App {
    pub fn initialize() -> Result<Self, ToolError> {
        let logger = Logger::new("pcxpress");
        let config = ClientConfig::from_env()?;
        logger.info(
            "client configured",
            Some(&serde_json::json!({
                "banner": config.banner,
                "domain": config.domain(),
                "store_id": config.store_id,
            })),
        );
        let client = Arc::new(PcxClient::new(logger.clone(), config));
        let shopping = ShoppingManager::new(logger.clone(), client);
        Ok(Self { logger, shopping })
    }
}
