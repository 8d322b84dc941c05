//! Per-function builders. Each one checks its arity rules first, then walks the streams in
//! index order.

use crate::config::model::{Config, GpuAcceleration, Payload, Stream, Video};
use crate::foundation::error::{BcsError, BcsResult};
use crate::generate::args::ArgsBuilder;
use crate::generate::layout::Grid;
use crate::generate::payload::{
    append_output_payload, append_payload, append_stream_conversion, payloads_differ,
};
use crate::generate::stream::{Direction, append_stream_type};

/// Upper bound on multiviewer grid columns.
pub const MAX_MULTIVIEWER_COLUMNS: u32 = 50;

const UPSCALE_FILTER: &str =
    "format=yuv420p,hwupload,raisr_opencl,hwdownload,format=yuv420p,format=yuv422p10le";

fn uses_qsv(cfg: &Config) -> bool {
    cfg.gpu_hw_acceleration == GpuAcceleration::Intel
}

fn append_input(stream: &Stream, index: usize, out: &mut ArgsBuilder) -> BcsResult<()> {
    append_payload(&stream.payload, out)?;
    append_stream_type(stream, Direction::Input { index }, out)
}

fn append_output(stream: &Stream, out: &mut ArgsBuilder) -> BcsResult<()> {
    append_output_payload(stream, out)?;
    append_stream_type(stream, Direction::Output, out)
}

/// `tx` / `rx`: `receivers[i]` feeds `senders[i]`, converting where the payloads differ.
pub(crate) fn append_relay(cfg: &Config, out: &mut ArgsBuilder) -> BcsResult<()> {
    if cfg.receivers.is_empty() || cfg.receivers.len() != cfg.senders.len() {
        return Err(BcsError::topology(format!(
            "function {} requires equal, non-zero numbers of receivers and senders, got {} and {}",
            cfg.function,
            cfg.receivers.len(),
            cfg.senders.len()
        )));
    }

    for (index, (rx, tx)) in cfg.receivers.iter().zip(&cfg.senders).enumerate() {
        append_input(rx, index, out)?;
        if payloads_differ(&rx.payload, &tx.payload)? {
            append_stream_conversion(rx, tx, out)?;
        }
        append_output(tx, out)?;
    }
    Ok(())
}

/// `multiviewer`: every receiver scaled into one tile of the single sender's frame.
pub(crate) fn append_multiviewer(cfg: &Config, out: &mut ArgsBuilder) -> BcsResult<()> {
    let [sender] = cfg.senders.as_slice() else {
        return Err(BcsError::topology(format!(
            "multiviewer requires exactly 1 sender, got {}",
            cfg.senders.len()
        )));
    };
    let Payload::Video(target) = &sender.payload else {
        return Err(BcsError::incompatible("multiviewer requires a video sender"));
    };
    if cfg.receivers.len() < 2 {
        return Err(BcsError::topology(format!(
            "multiviewer requires at least 2 receivers, got {}",
            cfg.receivers.len()
        )));
    }
    if !(1..=MAX_MULTIVIEWER_COLUMNS).contains(&cfg.multiviewer_columns) {
        return Err(BcsError::validation(format!(
            "multiviewer_columns must be within 1..={MAX_MULTIVIEWER_COLUMNS}, got {}",
            cfg.multiviewer_columns
        )));
    }

    for (index, rx) in cfg.receivers.iter().enumerate() {
        if rx.payload.as_video().is_none() {
            return Err(BcsError::incompatible(format!(
                "multiviewer input {index} carries {}, expected video",
                rx.payload.kind()
            )));
        }
        append_input(rx, index, out)?;
    }

    let grid = Grid::new(
        cfg.receivers.len(),
        cfg.multiviewer_columns,
        target.frame_width,
        target.frame_height,
    )?;
    out.opt_quoted("-filter_complex", multiviewer_filter(&grid, uses_qsv(cfg)));

    append_output(sender, out)
}

fn multiviewer_filter(grid: &Grid, qsv: bool) -> String {
    let scale = if qsv {
        "hwupload=extra_hw_frames=1,scale_qsv"
    } else {
        "scale"
    };

    let mut graph = String::new();
    for i in 0..grid.tiles {
        graph.push_str(&format!(
            "[{i}:v]{scale}={}:{}[out{i}];",
            grid.cell_width, grid.cell_height
        ));
    }
    for i in 0..grid.tiles {
        graph.push_str(&format!("[out{i}]"));
    }
    graph.push_str(if qsv { "xstack_qsv" } else { "xstack" });
    graph.push_str(&format!(
        "=inputs={}:layout={}",
        grid.tiles,
        grid.xstack_layout()
    ));
    if qsv {
        graph.push_str(",hwdownload,format=y210le");
    }
    graph.push_str(",format=yuv422p10le");
    graph
}

/// `recorder`: one receiver split into one scaled branch per sender.
pub(crate) fn append_recorder(cfg: &Config, out: &mut ArgsBuilder) -> BcsResult<()> {
    let [receiver] = cfg.receivers.as_slice() else {
        return Err(BcsError::topology(format!(
            "recorder requires exactly 1 receiver, got {}",
            cfg.receivers.len()
        )));
    };
    if receiver.payload.as_video().is_none() {
        return Err(BcsError::incompatible("recorder requires a video receiver"));
    }
    if cfg.senders.is_empty() {
        return Err(BcsError::topology("recorder requires at least 1 sender"));
    }
    if cfg.senders.len() < 2 {
        tracing::warn!("recorder with a single sender, a tx/rx relay does the same job");
    }
    let targets = cfg
        .senders
        .iter()
        .enumerate()
        .map(|(i, s)| {
            s.payload.as_video().ok_or_else(|| {
                BcsError::incompatible(format!(
                    "recorder output {i} carries {}, expected video",
                    s.payload.kind()
                ))
            })
        })
        .collect::<BcsResult<Vec<_>>>()?;

    append_input(receiver, 0, out)?;
    out.opt_quoted("-filter_complex", split_filter(&targets, uses_qsv(cfg)));

    for (i, sender) in cfg.senders.iter().enumerate() {
        out.opt_quoted("-map", format!("[out{i}]"));
        append_output(sender, out)?;
    }
    Ok(())
}

fn split_filter(targets: &[&Video], qsv: bool) -> String {
    let scale = if qsv {
        "hwupload=extra_hw_frames=1,scale_qsv"
    } else {
        "scale"
    };

    let mut graph = format!("split={}", targets.len());
    for i in 0..targets.len() {
        graph.push_str(&format!("[in{i}]"));
    }
    graph.push(';');
    for (i, video) in targets.iter().enumerate() {
        graph.push_str(&format!(
            "[in{i}]{scale}={}:{}[out{i}];",
            video.frame_width, video.frame_height
        ));
    }
    graph
}

/// `upscale`: fixed 2x super-resolution through VAAPI/OpenCL.
pub(crate) fn append_upscale(cfg: &Config, out: &mut ArgsBuilder) -> BcsResult<()> {
    let ([receiver], [sender]) = (cfg.receivers.as_slice(), cfg.senders.as_slice()) else {
        return Err(BcsError::topology(format!(
            "upscale requires exactly 1 receiver and 1 sender, got {} and {}",
            cfg.receivers.len(),
            cfg.senders.len()
        )));
    };
    let (Payload::Video(src), Payload::Video(dst)) = (&receiver.payload, &sender.payload) else {
        return Err(BcsError::incompatible("upscale requires video payloads"));
    };
    if src.frame_width.checked_mul(2) != Some(dst.frame_width)
        || src.frame_height.checked_mul(2) != Some(dst.frame_height)
    {
        return Err(BcsError::validation(format!(
            "upscale output must be exactly twice the input, got {}x{} -> {}x{}",
            src.frame_width, src.frame_height, dst.frame_width, dst.frame_height
        )));
    }

    out.opt("-init_hw_device", "vaapi=va")
        .opt("-init_hw_device", "opencl@va");
    append_input(receiver, 0, out)?;
    out.opt_quoted("-vf", UPSCALE_FILTER);
    append_output(sender, out)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/topology.rs"]
mod tests;
