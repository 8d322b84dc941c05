use crate::config::model::{Payload, Stream, StreamType, Video, VideoType};
use crate::foundation::error::{BcsError, BcsResult};
use crate::generate::args::ArgsBuilder;

fn audio_unsupported() -> BcsError {
    BcsError::unsupported("audio payloads are not supported yet")
}

/// Tokens describing the sample format of an engine input, or of a file output.
pub(crate) fn append_payload(payload: &Payload, out: &mut ArgsBuilder) -> BcsResult<()> {
    match payload {
        Payload::Video(video) => append_video(video, out),
        Payload::Audio(_) => Err(audio_unsupported()),
    }
}

/// Payload tokens for an engine output.
///
/// Files get the full description. Network muxers fix their own wire format, so they only take
/// a codec selector when one is configured.
pub(crate) fn append_output_payload(stream: &Stream, out: &mut ArgsBuilder) -> BcsResult<()> {
    match (&stream.stream_type, &stream.payload) {
        (StreamType::File(_), payload) => append_payload(payload, out),
        (_, Payload::Video(video)) => {
            if let VideoType::Codec(name) = &video.video_type {
                append_codec(name, video, out);
            }
            Ok(())
        }
        (_, Payload::Audio(_)) => Ok(()),
    }
}

fn append_video(video: &Video, out: &mut ArgsBuilder) -> BcsResult<()> {
    match &video.video_type {
        VideoType::Raw => {
            video.frame_rate.validate()?;
            out.opt(
                "-video_size",
                format!("{}x{}", video.frame_width, video.frame_height),
            )
            .opt("-pix_fmt", &video.pixel_format)
            .opt("-r", video.frame_rate)
            .opt("-f", VideoType::RAW);
        }
        VideoType::Codec(name) => append_codec(name, video, out),
        VideoType::Unspecified => {}
    }
    Ok(())
}

fn append_codec(name: &str, video: &Video, out: &mut ArgsBuilder) {
    out.opt("-c:v", name);
    if let Some(preset) = &video.preset {
        out.opt("-preset", preset);
    }
    if let Some(profile) = &video.profile {
        out.opt("-profile", profile);
    }
}

/// Whether `tx` needs a conversion from `rx`. Mixing media kinds is an error.
pub(crate) fn payloads_differ(rx: &Payload, tx: &Payload) -> BcsResult<bool> {
    match (rx, tx) {
        (Payload::Video(a), Payload::Video(b)) => Ok(a.frame_width != b.frame_width
            || a.frame_height != b.frame_height
            || a.frame_rate != b.frame_rate
            || a.pixel_format != b.pixel_format
            || a.video_type != b.video_type),
        (Payload::Audio(a), Payload::Audio(b)) => Ok(a.sample_rate != b.sample_rate
            || a.format != b.format
            || a.packet_time != b.packet_time),
        _ => Err(BcsError::incompatible(format!(
            "cannot feed a {} input into a {} output",
            rx.kind(),
            tx.kind()
        ))),
    }
}

/// Whether the output payload tokens of `stream` already carry pixel format and rate.
fn restates_raw_format(stream: &Stream) -> bool {
    matches!(
        (&stream.stream_type, &stream.payload),
        (StreamType::File(_), Payload::Video(Video { video_type: VideoType::Raw, .. }))
    )
}

/// Per-field override tokens turning the `rx` stream format into the `tx` format.
///
/// Raw file outputs restate `-pix_fmt` and `-r` in their own payload tokens, so only the scale
/// filter is emitted for them.
pub(crate) fn append_stream_conversion(
    rx: &Stream,
    tx: &Stream,
    out: &mut ArgsBuilder,
) -> BcsResult<()> {
    append_conversion_tokens(&rx.payload, &tx.payload, restates_raw_format(tx), out)
}

fn append_conversion_tokens(
    rx: &Payload,
    tx: &Payload,
    restated: bool,
    out: &mut ArgsBuilder,
) -> BcsResult<()> {
    let (a, b) = match (rx, tx) {
        (Payload::Video(a), Payload::Video(b)) => (a, b),
        (Payload::Audio(_), Payload::Audio(_)) => {
            return Err(BcsError::unsupported(
                "audio payload conversion is not supported yet",
            ));
        }
        _ => {
            return Err(BcsError::incompatible(format!(
                "cannot convert {} to {}",
                rx.kind(),
                tx.kind()
            )));
        }
    };

    if !restated && a.pixel_format != b.pixel_format {
        out.opt("-pix_fmt", &b.pixel_format);
    }
    if a.frame_width != b.frame_width || a.frame_height != b.frame_height {
        out.opt(
            "-vf",
            format!("scale={}x{}", b.frame_width, b.frame_height),
        );
    }
    if !restated && a.frame_rate != b.frame_rate {
        b.frame_rate.validate()?;
        out.opt("-r", b.frame_rate);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/payload.rs"]
mod tests;
