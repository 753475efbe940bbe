//! Vaccination and farrier reminder scheduling rules.

pub mod schedule;

pub use schedule::{
    default_farrier_due, farrier_due_within, next_due_from_interval, should_send_reminder,
    vaccination_reminder_open,
};
