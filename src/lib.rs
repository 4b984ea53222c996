//! # PagerDuty Events
//!
//! A Rust client library for triggering incidents through the
//! [PagerDuty generic Events API](https://developer.pagerduty.com/docs/events-api-v1/overview/).
//!
//! ## Features
//!
//! - Submit trigger events with a single async call
//! - Builder pattern for constructing events, details and contexts
//! - Optional fields are omitted from the payload when unset or empty
//! - Non-success responses surface as typed errors with the raw body
//!
//! ## Example
//!
//! ```rust,no_run
//! use pagerduty_events::{Context, PagerDutyClient, Trigger};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PagerDutyClient::new(
//!         "e93facc04764012d7bfb002500d5d1a6",
//!         Duration::from_secs(10),
//!     )?;
//!
//!     let trigger = Trigger::new("FAILURE for production/HTTP on machine srv01.acme.com")
//!         .with_incident_key("srv01/HTTP")
//!         .with_client("Sample Monitoring Service")
//!         .with_client_url("https://monitoring.service.com")
//!         .with_detail("ping time", "1500ms")
//!         .with_detail("load avg", 0.75)
//!         .with_context(
//!             Context::link("http://acme.pagerduty.com")
//!                 .with_text("View the incident on PagerDuty"),
//!         );
//!
//!     let response = client.trigger(&trigger).await?;
//!     println!("incident key: {}", response.incident_key);
//!     Ok(())
//! }
//! ```

mod client;
mod errors;
mod types;

pub use client::{PagerDutyClient, DEFAULT_BASE_URL};
pub use errors::{PagerDutyError, Result};
pub use types::{Context, ContextType, Trigger, TriggerResponse};
