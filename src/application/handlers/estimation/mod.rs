//! Estimation handlers.

mod add_estimation;

pub use add_estimation::{AddEstimationCommand, AddEstimationHandler, AddEstimationResult};
