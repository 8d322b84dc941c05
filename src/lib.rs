//! Control plane for a broadcast media pipeline.
//!
//! A node describes what it sends and receives as a [`Config`]: files, SMPTE ST 2110 flows or
//! Media Communications Mesh (MCM) connections, each carrying a video or audio payload, plus
//! the function to run between them. This crate turns that description into an `ffmpeg`
//! command line and can run it.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: parse a pipeline JSON ([`Config::from_json`]) or a media-node file
//!    ([`parse_node_config`]); on connection activation the [`StreamTracker`] assembles one.
//! 2. **Generate**: [`generate_pipeline`] validates the topology and emits typed tokens
//!    ([`Pipeline`]). Generation is pure; a failure yields an error, never a partial line.
//! 3. **Execute** (optional): [`CommandService`] hands the tokens to a [`PipelineRunner`] and
//!    reports a status code.
//!
//! Functions: `tx`/`rx` relay N inputs to N outputs, `multiviewer` tiles N inputs into one
//! output, `recorder` fans one input out to N scaled outputs, `upscale` doubles the resolution.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Configuration data model and file formats.
pub mod config;
/// Running generated pipelines.
pub mod exec;
/// Error types.
pub mod foundation;
/// Command-line generation.
pub mod generate;
/// Media-node integration.
pub mod node;

pub use config::model::{
    Audio, Config, File, FrameRate, Function, GpuAcceleration, Mcm, Payload, St2110,
    St2110Transport, Stream, StreamType, Video, VideoType,
};
pub use config::node::{load_node_config, parse_node_config};
pub use exec::app_params::{process_app_params, process_config_file};
pub use exec::runner::{FfmpegRunner, PipelineRunner, RunOutput};
pub use exec::service::{CommandPair, CommandResponse, CommandService, ExecStatus};
pub use foundation::error::{BcsError, BcsResult};
pub use generate::args::{Arg, Pipeline};
pub use generate::pipeline::generate_pipeline;
pub use node::tracker::{ActivationParams, StreamTracker};
