/// Registered streams and connection activation.
pub mod tracker;
