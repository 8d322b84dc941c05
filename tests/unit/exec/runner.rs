use super::*;

#[test]
fn success_means_exit_zero() {
    let ok = RunOutput {
        exit_code: Some(0),
        output: String::new(),
    };
    assert!(ok.success());
    let failed = RunOutput {
        exit_code: Some(1),
        output: String::new(),
    };
    assert!(!failed.success());
    let signalled = RunOutput {
        exit_code: None,
        output: String::new(),
    };
    assert!(!signalled.success());
}

#[test]
fn missing_binary_is_an_execution_error() {
    let runner = FfmpegRunner::new("/nonexistent/bcs-engine-binary");
    assert!(!runner.is_available());
    let err = runner.run(&["-version".to_string()]).unwrap_err();
    assert!(matches!(err, BcsError::Execution(_)));
    assert!(err.to_string().contains("/nonexistent/bcs-engine-binary"));
}

#[test]
fn default_binary_is_ffmpeg() {
    assert_eq!(FfmpegRunner::default().binary(), Path::new("ffmpeg"));
}
