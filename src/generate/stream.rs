use crate::config::model::{Mcm, Payload, St2110, Stream, StreamType};
use crate::foundation::error::{BcsError, BcsResult};
use crate::generate::args::ArgsBuilder;

/// Side of the engine an endpoint sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Engine input; `index` is its position among the inputs.
    Input { index: usize },
    /// Engine output, written to the next unmapped output slot.
    Output,
}

/// Transport tokens for one endpoint.
pub(crate) fn append_stream_type(
    stream: &Stream,
    dir: Direction,
    out: &mut ArgsBuilder,
) -> BcsResult<()> {
    match &stream.stream_type {
        StreamType::File(file) => {
            match dir {
                Direction::Input { .. } => out.opt("-i", file.location()),
                Direction::Output => out.plain(file.location()),
            };
        }
        StreamType::St2110(st) => append_st2110(st, dir, out),
        StreamType::Mcm(mcm) => append_mcm(mcm, &stream.payload, dir, out)?,
    }
    Ok(())
}

fn append_st2110(st: &St2110, dir: Direction, out: &mut ArgsBuilder) {
    out.opt("-p_port", &st.network_interface)
        .opt("-p_sip", &st.local_ip)
        .opt("-udp_port", st.remote_port)
        .opt("-payload_type", st.payload_type);
    let (ip_flag, queues_flag) = match dir {
        Direction::Input { .. } => ("-p_rx_ip", "-rx_queues"),
        Direction::Output => ("-p_tx_ip", "-tx_queues"),
    };
    out.opt(ip_flag, &st.remote_ip);
    if st.queues_cnt != 0 {
        out.opt(queues_flag, st.queues_cnt);
    }
    out.opt("-f", st.transport.mtl_format());
    append_slot_marker(dir, out);
}

fn append_mcm(
    mcm: &Mcm,
    payload: &Payload,
    dir: Direction,
    out: &mut ArgsBuilder,
) -> BcsResult<()> {
    out.opt("-f", mcm_format(payload)?)
        .opt("-conn_type", &mcm.conn_type)
        .opt("-transport", &mcm.transport);
    if mcm.transport == "st2110-20" {
        out.opt("-transport_pixel_format", &mcm.transport_pixel_format);
    }
    out.opt("-ip_addr", &mcm.ip).opt("-port", mcm.port);
    append_slot_marker(dir, out);
    Ok(())
}

fn mcm_format(payload: &Payload) -> BcsResult<&'static str> {
    match payload {
        Payload::Video(_) => Ok("mcm"),
        Payload::Audio(audio) => match audio.format.as_str() {
            "s16be" | "s16le" | "u16be" | "u16le" => Ok("mcm_audio_pcm16"),
            "s24be" | "s24le" | "u24be" | "u24le" => Ok("mcm_audio_pcm24"),
            other => Err(BcsError::unsupported(format!(
                "mcm audio format '{other}'"
            ))),
        },
    }
}

fn append_slot_marker(dir: Direction, out: &mut ArgsBuilder) {
    match dir {
        Direction::Input { index } => out.opt_quoted("-i", index),
        Direction::Output => out.plain("-"),
    };
}

#[cfg(test)]
#[path = "../../tests/unit/generate/stream.rs"]
mod tests;
