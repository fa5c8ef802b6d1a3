//! Receive-side routing: decode, validate, dispatch, and the propagate decision.

mod metrics;
mod registry;
mod router;

pub use metrics::{MetricsSnapshot, RouterMetrics};
pub use registry::{Handler, HandlerRegistry};
pub use router::{Outcome, Router};
