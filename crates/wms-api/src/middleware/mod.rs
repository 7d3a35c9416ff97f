//! HTTP middleware

pub mod cron_auth;

pub use cron_auth::{require_cron_secret, CronAuth};
