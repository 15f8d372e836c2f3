pub mod json;

pub use json::rejection_to_error;
