//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod dashboard;
mod demo;
pub mod logging;

pub use dashboard::DashboardService;
pub use demo::DemoService;
pub use logging::{LogEntry, LogEvent, LoggingService};
