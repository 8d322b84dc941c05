/// Typed configuration data model and its JSON mapping.
pub mod model;
/// Media-node configuration file parser.
pub mod node;
