use super::*;
use crate::config::model::{Audio, File, FrameRate, Mcm};

fn raw_1080p() -> Video {
    Video::raw(1920, 1080, FrameRate::new(30, 1), "yuv422p10le")
}

fn render(f: impl FnOnce(&mut ArgsBuilder) -> BcsResult<()>) -> BcsResult<String> {
    let mut b = ArgsBuilder::new();
    f(&mut b)?;
    Ok(b.finish().to_string())
}

fn audio() -> Payload {
    Payload::Audio(Audio {
        channels: 2,
        sample_rate: 48000,
        format: "s24be".to_string(),
        packet_time: "1ms".to_string(),
    })
}

#[test]
fn rawvideo_emits_full_description() {
    let out = render(|b| append_payload(&Payload::Video(raw_1080p()), b)).unwrap();
    assert_eq!(
        out,
        " -video_size 1920x1080 -pix_fmt yuv422p10le -r 30/1 -f rawvideo"
    );
}

#[test]
fn codec_emits_selector_with_preset_and_profile() {
    let mut video = raw_1080p();
    video.video_type = VideoType::Codec("h263p".to_string());
    video.preset = Some("veryfast".to_string());
    video.profile = Some("main".to_string());
    let out = render(|b| append_payload(&Payload::Video(video), b)).unwrap();
    assert_eq!(out, " -c:v h263p -preset veryfast -profile main");
}

#[test]
fn unspecified_video_type_emits_nothing() {
    let mut video = raw_1080p();
    video.video_type = VideoType::Unspecified;
    video.preset = Some("ignored".to_string());
    let out = render(|b| append_payload(&Payload::Video(video), b)).unwrap();
    assert_eq!(out, "");
}

#[test]
fn audio_and_zero_denominator_fail() {
    assert!(matches!(
        render(|b| append_payload(&audio(), b)),
        Err(BcsError::Unsupported(_))
    ));

    let mut video = raw_1080p();
    video.frame_rate = FrameRate::new(30, 0);
    assert!(matches!(
        render(|b| append_payload(&Payload::Video(video), b)),
        Err(BcsError::Validation(_))
    ));
}

#[test]
fn network_outputs_only_take_codec_selector() {
    let mcm = StreamType::Mcm(Mcm::default());
    let raw = Stream::new(Payload::Video(raw_1080p()), mcm.clone());
    assert_eq!(render(|b| append_output_payload(&raw, b)).unwrap(), "");

    let mut video = raw_1080p();
    video.video_type = VideoType::Codec("jpegxs".to_string());
    let coded = Stream::new(Payload::Video(video), mcm);
    assert_eq!(
        render(|b| append_output_payload(&coded, b)).unwrap(),
        " -c:v jpegxs"
    );

    let file = Stream::new(
        Payload::Video(raw_1080p()),
        StreamType::File(File {
            path: "/tmp".to_string(),
            filename: "a.yuv".to_string(),
        }),
    );
    assert!(render(|b| append_output_payload(&file, b)).unwrap().contains("-f rawvideo"));
}

#[test]
fn differ_detects_each_field_and_rejects_kind_mismatch() {
    let base = Payload::Video(raw_1080p());
    assert!(!payloads_differ(&base, &base).unwrap());

    let mut other = raw_1080p();
    other.pixel_format = "yuv422p".to_string();
    assert!(payloads_differ(&base, &Payload::Video(other)).unwrap());

    let mut other = raw_1080p();
    other.video_type = VideoType::Unspecified;
    assert!(payloads_differ(&base, &Payload::Video(other)).unwrap());

    assert!(matches!(
        payloads_differ(&base, &audio()),
        Err(BcsError::Incompatible(_))
    ));
}

fn mcm_out(video: Video) -> Stream {
    Stream::new(Payload::Video(video), StreamType::Mcm(Mcm::default()))
}

fn file_out(video: Video) -> Stream {
    Stream::new(
        Payload::Video(video),
        StreamType::File(File {
            path: "/videos".to_string(),
            filename: "out.yuv".to_string(),
        }),
    )
}

#[test]
fn conversion_only_touches_changed_fields() {
    let rx = mcm_out(raw_1080p());

    let mut tx = raw_1080p();
    tx.frame_width = 1280;
    tx.frame_height = 720;
    let out = render(|b| append_stream_conversion(&rx, &mcm_out(tx), b)).unwrap();
    assert_eq!(out, " -vf scale=1280x720");

    let mut tx = raw_1080p();
    tx.pixel_format = "yuv422p".to_string();
    tx.frame_rate = FrameRate::new(5, 1);
    let out = render(|b| append_stream_conversion(&rx, &mcm_out(tx), b)).unwrap();
    assert_eq!(out, " -pix_fmt yuv422p -r 5/1");

    let audio_stream = Stream::new(audio(), StreamType::Mcm(Mcm::default()));
    assert!(matches!(
        render(|b| append_stream_conversion(&audio_stream, &audio_stream, b)),
        Err(BcsError::Unsupported(_))
    ));
}

#[test]
fn raw_file_output_keeps_only_the_scale_filter() {
    let rx = mcm_out(raw_1080p());
    let mut tx = raw_1080p();
    tx.frame_width = 1280;
    tx.frame_height = 720;
    tx.pixel_format = "yuv422p".to_string();
    tx.frame_rate = FrameRate::new(5, 1);

    let out = render(|b| append_stream_conversion(&rx, &file_out(tx), b)).unwrap();
    assert_eq!(out, " -vf scale=1280x720");
}
