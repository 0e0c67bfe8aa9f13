pub mod cars;
pub mod health;
pub mod legacy_stats;
pub mod metrics;
pub mod request_id;
