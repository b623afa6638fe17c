//! Application Layer
//!
//! Orchestrates between the CLI and the domain/infrastructure layers:
//! - `capture_service`: a capture session bound to a weight source and a store
//! - `query_service`: read and housekeeping access to stored data
//! - `notice`: user-facing messages for capture events

pub mod capture_service;
pub mod notice;
pub mod query_service;

pub use capture_service::{CaptureServiceError, CaptureSession, SessionOptions};
pub use notice::{Notice, NoticeLevel};
pub use query_service::QueryServiceError;
