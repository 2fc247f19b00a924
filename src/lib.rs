//! Deterministic identity normalization and roster/engagement reconciliation.
//!
//! `engagement-core` turns inconsistently formatted identity strings from
//! uploaded CSV or spreadsheet files into canonical keys, then reconciles a
//! platform roster against a post's engagement: counts, percentage, matched and
//! unmatched members, and the engaged identities missing from the roster.
//! Normalization is total, deterministic and idempotent; matching is exact on
//! canonical keys.

pub mod config;
pub mod identity;
pub mod ingest;
pub mod reconcile;
pub mod store;
pub mod tracker;
pub mod types;

pub use config::IngestConfig;
pub use identity::normalize;
pub use ingest::{IngestError, Ingestor};
pub use reconcile::{diagnose, reconcile};
pub use tracker::{EngagementTracker, TrackerError};
