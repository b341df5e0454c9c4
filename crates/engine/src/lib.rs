//! # engine
//!
//! Aggregation store and naive average-based predictor for the prediction
//! engine API. Uploaded records are held in memory, grouped by category;
//! predictions are a pure rollup over the offers category, computed on demand.

pub mod chat;
pub mod error;
pub mod predictor;
pub mod record;
pub mod store;

pub use chat::{compose_reply, ChatReply};
pub use error::EngineError;
pub use predictor::{predict, Prediction};
pub use record::{numeric_field, Record};
pub use store::{Category, DataCounts, HistoricalStore};

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
