use super::*;
use crate::config::model::{Audio, File, FrameRate, Function, StreamType};

fn file_video(w: u32, h: u32, name: &str) -> Stream {
    Stream::new(
        Payload::Video(Video::raw(w, h, FrameRate::new(30, 1), "yuv422p10le")),
        StreamType::File(File {
            path: "/videos".to_string(),
            filename: name.to_string(),
        }),
    )
}

fn file_audio() -> Stream {
    Stream::new(
        Payload::Audio(Audio {
            channels: 2,
            sample_rate: 48000,
            format: "s24be".to_string(),
            packet_time: "1ms".to_string(),
        }),
        StreamType::File(File {
            path: "/audio".to_string(),
            filename: "a.pcm".to_string(),
        }),
    )
}

fn render(
    cfg: &Config,
    f: fn(&Config, &mut ArgsBuilder) -> BcsResult<()>,
) -> BcsResult<String> {
    let mut b = ArgsBuilder::new();
    f(cfg, &mut b)?;
    Ok(b.finish().to_string())
}

#[test]
fn relay_converts_only_changed_fields() {
    let mut cfg = Config::new(Function::Tx);
    cfg.receivers.push(file_video(1920, 1080, "in.yuv"));
    let mut out = file_video(1280, 720, "out.yuv");
    if let Payload::Video(v) = &mut out.payload {
        v.frame_rate = FrameRate::new(25, 1);
    }
    cfg.senders.push(out);

    let s = render(&cfg, append_relay).unwrap();
    assert_eq!(
        s,
        " -video_size 1920x1080 -pix_fmt yuv422p10le -r 30/1 -f rawvideo -i /videos/in.yuv \
         -vf scale=1280x720 -r 25/1 \
         -video_size 1280x720 -pix_fmt yuv422p10le -r 25/1 -f rawvideo /videos/out.yuv"
    );
}

#[test]
fn relay_requires_matching_non_zero_counts() {
    let mut cfg = Config::new(Function::Rx);
    assert!(matches!(
        render(&cfg, append_relay),
        Err(BcsError::Topology(_))
    ));
    cfg.receivers.push(file_video(1920, 1080, "a.yuv"));
    cfg.receivers.push(file_video(1920, 1080, "b.yuv"));
    cfg.senders.push(file_video(1920, 1080, "c.yuv"));
    assert!(matches!(
        render(&cfg, append_relay),
        Err(BcsError::Topology(_))
    ));
}

#[test]
fn relay_rejects_mixed_media() {
    let mut cfg = Config::new(Function::Tx);
    cfg.receivers.push(file_video(1920, 1080, "a.yuv"));
    cfg.senders.push(file_audio());
    assert!(matches!(
        render(&cfg, append_relay),
        Err(BcsError::Incompatible(_))
    ));
}

#[test]
fn multiviewer_filter_lays_out_tiles() {
    let mut cfg = Config::new(Function::Multiviewer);
    cfg.multiviewer_columns = 2;
    for i in 0..3 {
        cfg.receivers
            .push(file_video(1920, 1080, &format!("in{i}.yuv")));
    }
    cfg.senders.push(file_video(1920, 1080, "mv.yuv"));

    let s = render(&cfg, append_multiviewer).unwrap();
    assert!(s.contains(
        "-filter_complex \"[0:v]scale=960:540[out0];[1:v]scale=960:540[out1];\
         [2:v]scale=960:540[out2];[out0][out1][out2]\
         xstack=inputs=3:layout=0_0|960_0|0_540,format=yuv422p10le\""
    ));
    assert!(s.ends_with(" /videos/mv.yuv"));
}

#[test]
fn multiviewer_uses_qsv_filters_on_intel() {
    let mut cfg = Config::new(Function::Multiviewer);
    cfg.multiviewer_columns = 2;
    cfg.gpu_hw_acceleration = GpuAcceleration::Intel;
    cfg.receivers.push(file_video(1920, 1080, "a.yuv"));
    cfg.receivers.push(file_video(1920, 1080, "b.yuv"));
    cfg.senders.push(file_video(1920, 1080, "mv.yuv"));

    let s = render(&cfg, append_multiviewer).unwrap();
    assert!(s.contains("[0:v]hwupload=extra_hw_frames=1,scale_qsv=960:1080[out0];"));
    assert!(s.contains("xstack_qsv=inputs=2:layout=0_0|960_0,hwdownload,format=y210le,format=yuv422p10le"));
}

#[test]
fn multiviewer_preconditions() {
    let mut cfg = Config::new(Function::Multiviewer);
    cfg.multiviewer_columns = 2;
    cfg.receivers.push(file_video(1920, 1080, "a.yuv"));
    cfg.senders.push(file_video(1920, 1080, "mv.yuv"));
    assert!(matches!(
        render(&cfg, append_multiviewer),
        Err(BcsError::Topology(_))
    ));

    cfg.receivers.push(file_video(1920, 1080, "b.yuv"));
    cfg.multiviewer_columns = 51;
    assert!(matches!(
        render(&cfg, append_multiviewer),
        Err(BcsError::Validation(_))
    ));
    cfg.multiviewer_columns = 0;
    assert!(matches!(
        render(&cfg, append_multiviewer),
        Err(BcsError::Validation(_))
    ));

    cfg.multiviewer_columns = 50;
    cfg.receivers[1] = file_audio();
    assert!(matches!(
        render(&cfg, append_multiviewer),
        Err(BcsError::Incompatible(_))
    ));
}

#[test]
fn recorder_maps_one_branch_per_sender() {
    let mut cfg = Config::new(Function::Recorder);
    cfg.receivers.push(file_video(1920, 1080, "in.yuv"));
    cfg.senders.push(file_video(1920, 1080, "full.yuv"));
    cfg.senders.push(file_video(640, 360, "thumb.yuv"));

    let s = render(&cfg, append_recorder).unwrap();
    assert!(s.contains(
        "-filter_complex \"split=2[in0][in1];[in0]scale=1920:1080[out0];[in1]scale=640:360[out1];\""
    ));
    assert!(s.contains("-map \"[out0]\" -video_size 1920x1080"));
    assert!(s.contains("-map \"[out1]\" -video_size 640x360"));
}

#[test]
fn recorder_preconditions() {
    let mut cfg = Config::new(Function::Recorder);
    cfg.receivers.push(file_video(1920, 1080, "in.yuv"));
    assert!(matches!(
        render(&cfg, append_recorder),
        Err(BcsError::Topology(_))
    ));

    // a single sender is allowed
    cfg.senders.push(file_video(1920, 1080, "out.yuv"));
    assert!(render(&cfg, append_recorder).is_ok());

    cfg.senders.push(file_audio());
    assert!(matches!(
        render(&cfg, append_recorder),
        Err(BcsError::Incompatible(_))
    ));
}

#[test]
fn upscale_requires_exact_doubling() {
    let mut cfg = Config::new(Function::Upscale);
    cfg.receivers.push(file_video(960, 540, "in.yuv"));
    cfg.senders.push(file_video(1920, 1080, "out.yuv"));
    let s = render(&cfg, append_upscale).unwrap();
    assert!(s.starts_with(" -init_hw_device vaapi=va -init_hw_device opencl@va -video_size 960x540"));
    assert!(s.contains(&format!("-vf \"{UPSCALE_FILTER}\"")));

    cfg.senders[0] = file_video(1920, 1081, "out.yuv");
    assert!(matches!(
        render(&cfg, append_upscale),
        Err(BcsError::Validation(_))
    ));

    cfg.senders.push(file_video(1920, 1080, "extra.yuv"));
    assert!(matches!(
        render(&cfg, append_upscale),
        Err(BcsError::Topology(_))
    ));
}
