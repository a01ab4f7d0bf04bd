pub mod api {
    pub const BASE_URL: &str = "https://api.pcexpress.ca/pcx-bff/api/v1";

    // Static web-client key, shared by every storefront.
    pub const API_KEY: &str = "C1xujSegT5j3ap3yexJjqhOfELwGKYvz";
    pub const BUSINESS_USER_AGENT: &str = "PCXWEB";
    pub const TENANT_ID: &str = "ONLINE_GROCERIES";
    pub const APPLICATION_TYPE: &str = "Web";

    // Storefront pages reject non-browser agents.
    pub const BROWSER_USER_AGENT: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
}

pub mod banners {
    pub const DEFAULT_BANNER: &str = "zehrs";
    pub const DEFAULT_DOMAIN: &str = "www.zehrs.ca";

    pub const DOMAINS: &[(&str, &str)] = &[
        ("zehrs", "www.zehrs.ca"),
        ("loblaws", "www.loblaws.ca"),
        ("nofrills", "www.nofrills.ca"),
        ("superstore", "www.realcanadiansuperstore.ca"),
        ("independent", "www.yourindependentgrocer.ca"),
        ("tandt", "www.tntsupermarket.com"),
    ];
}

pub mod network {
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
}

pub mod defaults {
    pub const STORE_ID: &str = "1234";
    pub const ORDER_LIMIT: usize = 10;
    pub const SEARCH_LIMIT: usize = 7;
    pub const CART_QUANTITY: i64 = 1;
    pub const FULFILLMENT_METHOD: &str = "pickup";
}
