/// Command-line tokens and the assembled [`args::Pipeline`].
pub mod args;
/// Multiviewer tile grid math.
pub mod layout;
/// Payload description and conversion tokens.
pub(crate) mod payload;
/// Entry point: [`pipeline::generate_pipeline`].
pub mod pipeline;
/// Transport tokens for file, ST 2110 and MCM endpoints.
pub(crate) mod stream;
/// Per-function graph builders.
pub(crate) mod topology;

pub use topology::MAX_MULTIVIEWER_COLUMNS;
