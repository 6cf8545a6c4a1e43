//! # Utility Modules
//!
//! Supporting utilities shared by the packet core.
//!
//! ## Components
//! - **Logging**: structured logging configuration via `tracing-subscriber`

pub mod logging;
