use super::*;
use crate::config::model::{File, FrameRate, Payload, Stream, StreamType, Video};

fn relay() -> Config {
    let file = |name: &str| {
        Stream::new(
            Payload::Video(Video::raw(1920, 1080, FrameRate::new(30, 1), "yuv422p10le")),
            StreamType::File(File {
                path: "/v".to_string(),
                filename: name.to_string(),
            }),
        )
    };
    let mut cfg = Config::new(Function::Tx);
    cfg.receivers.push(file("in.yuv"));
    cfg.senders.push(file("out.yuv"));
    cfg
}

#[test]
fn global_prefix_order() {
    let mut cfg = relay();
    cfg.logging_level = 1;
    cfg.stream_loop = -1;
    cfg.gpu_hw_acceleration = GpuAcceleration::Nvidia;
    let s = generate_pipeline(&cfg).unwrap().to_string();
    assert!(s.starts_with(
        " -v debug -stream_loop -1 -y -hwaccel cuda -hwaccel_output_format cuda -video_size"
    ));
}

#[test]
fn plain_prefix_is_just_overwrite() {
    let s = generate_pipeline(&relay()).unwrap().to_string();
    assert!(s.starts_with(" -y -video_size 1920x1080"));
}

#[test]
fn intel_needs_a_device() {
    let mut cfg = relay();
    cfg.gpu_hw_acceleration = GpuAcceleration::Intel;
    assert!(matches!(
        generate_pipeline(&cfg),
        Err(BcsError::MissingParameter(_))
    ));

    cfg.gpu_hw_acceleration_device = Some(String::new());
    assert!(matches!(
        generate_pipeline(&cfg),
        Err(BcsError::MissingParameter(_))
    ));

    cfg.gpu_hw_acceleration_device = Some("/dev/dri/renderD128".to_string());
    let s = generate_pipeline(&cfg).unwrap().to_string();
    assert!(s.starts_with(" -y -qsv_device /dev/dri/renderD128 -hwaccel qsv "));
}

#[test]
fn argv_drops_shell_quotes() {
    let mut cfg = relay();
    cfg.function = Function::Upscale;
    cfg.senders[0] = Stream::new(
        Payload::Video(Video::raw(3840, 2160, FrameRate::new(30, 1), "yuv422p10le")),
        cfg.senders[0].stream_type.clone(),
    );
    let p = generate_pipeline(&cfg).unwrap();
    assert!(p.to_string().contains("-vf \"format=yuv420p,"));
    assert!(p.argv().iter().any(|a| a.starts_with("format=yuv420p,")));
}
