// netpulse-core/src/domain/kpi/mod.rs
//
// Column vocabulary of the network KPI fact and its two grains.

pub mod aggregator;

pub use aggregator::KpiAggregator;

pub const DATE_KEY: &str = "date_key";
pub const SITE_KEY: &str = "site_key";
pub const REGION_KEY: &str = "region_key";
pub const SERVICE_KEY: &str = "service_key";
pub const VENDOR_KEY: &str = "vendor_key";

pub const UPTIME_MINUTES: &str = "uptime_minutes";
pub const DOWNTIME_MINUTES: &str = "downtime_minutes";
pub const AVAILABILITY: &str = "availability";
pub const AVG_LATENCY_MS: &str = "avg_latency_ms";
pub const PACKET_LOSS_PCT: &str = "packet_loss_pct";

/// Site-level grain of the raw fact.
pub const RAW_GRAIN: [&str; 4] = [DATE_KEY, SITE_KEY, SERVICE_KEY, VENDOR_KEY];

/// Regional "executive" grain of the curated fact.
pub const CURATED_GRAIN: [&str; 4] = [DATE_KEY, REGION_KEY, SERVICE_KEY, VENDOR_KEY];

/// Column layout of the curated output, in order.
pub const CURATED_COLUMNS: [&str; 9] = [
    DATE_KEY,
    REGION_KEY,
    SERVICE_KEY,
    VENDOR_KEY,
    UPTIME_MINUTES,
    DOWNTIME_MINUTES,
    AVAILABILITY,
    AVG_LATENCY_MS,
    PACKET_LOSS_PCT,
];
