/// `appParams` pass-through flags.
pub mod app_params;
/// Engine process runner.
pub mod runner;
/// Request handling and status codes.
pub mod service;
