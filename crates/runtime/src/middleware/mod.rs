//! Stock middlewares for the decision chain.

mod logger;
mod performance;

pub use logger::DecisionLogger;
pub use performance::{DEFAULT_FRAME_BUDGET, PerformanceMonitor};
