pub mod list_recent_orders_command;

pub use list_recent_orders_command::{
    reminder_window_start, ListRecentOrdersCommand, RecentOrder, REMINDER_WINDOW_DAYS,
};
