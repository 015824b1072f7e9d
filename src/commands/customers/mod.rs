pub mod delete_inactive_customers_command;

pub use delete_inactive_customers_command::{
    inactivity_cutoff, DeleteInactiveCustomersCommand, InactiveCustomerSweep,
    INACTIVITY_WINDOW_DAYS,
};
