//! One-shot maintenance jobs. Each `run` is what a scheduler invocation
//! executes; the binaries only load config and wire dependencies.

pub mod clean_inactive_customers;
pub mod crm_heartbeat;
pub mod send_order_reminders;
