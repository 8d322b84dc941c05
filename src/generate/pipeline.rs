use crate::config::model::{Config, Function, GpuAcceleration};
use crate::foundation::error::{BcsError, BcsResult};
use crate::generate::args::{ArgsBuilder, Pipeline};
use crate::generate::topology;

/// Turn a [`Config`] into the engine command line.
///
/// Pure and deterministic: the same config always yields the same tokens, and a failed call
/// leaves nothing behind. Structural problems surface as errors instead of partial output.
#[tracing::instrument(level = "debug", skip(cfg), fields(function = %cfg.function))]
pub fn generate_pipeline(cfg: &Config) -> BcsResult<Pipeline> {
    let mut out = ArgsBuilder::new();
    append_global_options(cfg, &mut out)?;

    match cfg.function {
        Function::Tx | Function::Rx => topology::append_relay(cfg, &mut out)?,
        Function::Multiviewer => topology::append_multiviewer(cfg, &mut out)?,
        Function::Recorder => topology::append_recorder(cfg, &mut out)?,
        Function::Upscale => topology::append_upscale(cfg, &mut out)?,
    }

    let pipeline = out.finish();
    tracing::debug!(tokens = pipeline.len(), "pipeline generated");
    Ok(pipeline)
}

fn append_global_options(cfg: &Config, out: &mut ArgsBuilder) -> BcsResult<()> {
    if cfg.logging_level > 0 {
        out.opt("-v", "debug");
    }
    if cfg.stream_loop != 0 {
        out.opt("-stream_loop", cfg.stream_loop);
    }
    out.plain("-y");

    match cfg.gpu_hw_acceleration {
        GpuAcceleration::None => {}
        GpuAcceleration::Intel => {
            let device = cfg
                .gpu_hw_acceleration_device
                .as_deref()
                .filter(|d| !d.is_empty())
                .ok_or_else(|| {
                    BcsError::missing("intel acceleration needs gpu_hw_acceleration_device")
                })?;
            out.opt("-qsv_device", device).opt("-hwaccel", "qsv");
        }
        GpuAcceleration::Nvidia => {
            out.opt("-hwaccel", "cuda")
                .opt("-hwaccel_output_format", "cuda");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/pipeline.rs"]
mod tests;
