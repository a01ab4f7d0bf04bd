use crate::constants::{banners, defaults};
use crate::errors::ToolError;

const ENV_BEARER_TOKEN: &str = "PCEXPRESS_BEARER_TOKEN";
const ENV_CUSTOMER_ID: &str = "PCEXPRESS_CUSTOMER_ID";
const ENV_CART_ID: &str = "PCEXPRESS_CART_ID";
const ENV_STORE_ID: &str = "PCEXPRESS_STORE_ID";
const ENV_BANNER: &str = "PCEXPRESS_BANNER";

/// Credentials and routing for one shopping session. Built once at startup,
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub bearer_token: String,
    pub customer_id: String,
    pub cart_id: String,
    pub store_id: String,
    pub banner: String,
}

impl ClientConfig {
    pub fn new(
        bearer_token: impl Into<String>,
        customer_id: impl Into<String>,
        cart_id: impl Into<String>,
        store_id: impl Into<String>,
        banner: impl Into<String>,
    ) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            customer_id: customer_id.into(),
            cart_id: cart_id.into(),
            store_id: store_id.into(),
            banner: banner.into().trim().to_lowercase(),
        }
    }

    pub fn from_env() -> Result<Self, ToolError> {
        let bearer_token = read_env(ENV_BEARER_TOKEN);
        let customer_id = read_env(ENV_CUSTOMER_ID);
        let cart_id = read_env(ENV_CART_ID);

        let missing: Vec<&str> = [
            (ENV_BEARER_TOKEN, &bearer_token),
            (ENV_CUSTOMER_ID, &customer_id),
            (ENV_CART_ID, &cart_id),
        ]
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
        if !missing.is_empty() {
            return Err(ToolError::config(format!(
                "Missing required credentials. Set environment variables: {}",
                missing.join(", ")
            )));
        }

        let store_id =
            read_env(ENV_STORE_ID).unwrap_or_else(|| defaults::STORE_ID.to_string());
        let banner =
            read_env(ENV_BANNER).unwrap_or_else(|| banners::DEFAULT_BANNER.to_string());

        Ok(Self::new(
            bearer_token.unwrap_or_default(),
            customer_id.unwrap_or_default(),
            cart_id.unwrap_or_default(),
            store_id,
            banner,
        ))
    }

    /// Storefront domain for this banner. Unrecognized banners fall back to
    /// the default domain rather than failing.
    pub fn domain(&self) -> &'static str {
        domain_for(&self.banner)
    }
}

pub fn domain_for(banner: &str) -> &'static str {
    banners::DOMAINS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(banner.trim()))
        .map(|(_, domain)| *domain)
        .unwrap_or(banners::DEFAULT_DOMAIN)
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_banner_maps_to_its_own_domain() {
        for (banner, domain) in banners::DOMAINS {
            assert_eq!(domain_for(banner), *domain);
        }
    }

    #[test]
    fn banner_lookup_is_case_insensitive() {
        assert_eq!(domain_for("NoFrills"), "www.nofrills.ca");
        assert_eq!(domain_for("SUPERSTORE"), "www.realcanadiansuperstore.ca");
    }

    #[test]
    fn unrecognized_banner_falls_back_to_default_domain() {
        assert_eq!(domain_for("corner-store"), banners::DEFAULT_DOMAIN);
        assert_eq!(domain_for(""), banners::DEFAULT_DOMAIN);
    }

    #[test]
    fn constructor_normalizes_banner_case() {
        let config = ClientConfig::new("t", "c", "k", "1234", " Zehrs ");
        assert_eq!(config.banner, "zehrs");
        assert_eq!(config.domain(), "www.zehrs.ca");
    }
}
