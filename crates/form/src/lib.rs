mod client;
mod controller;

pub use client::*;
pub use controller::*;

/// Shown when the lead could not be delivered for a reason the user cannot fix.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred while sending the form.";

/// Shown when the server did not answer within the submit timeout.
pub const TIMEOUT_MESSAGE: &str = "The request took too long. Please try again.";
