//! Maps UI service errors to jma_core::AppError for consistent user-facing messages.

mod weather;
