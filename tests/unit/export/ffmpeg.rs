use super::*;

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let dir = std::env::temp_dir().join(format!("stickframe_webm_odd_{}", std::process::id()));
    let mut sink = WebmSink::new(WebmSinkOpts::new(dir.join("out.webm")));
    let err = sink
        .begin(SinkConfig {
            width: 3,
            height: 2,
            fps: 12,
        })
        .unwrap_err();
    assert!(matches!(err, StickframeError::Validation(_)));
}

#[test]
fn missing_ffmpeg_is_reported_as_unavailable() {
    if is_ffmpeg_on_path() {
        return;
    }
    let dir = std::env::temp_dir().join(format!("stickframe_webm_none_{}", std::process::id()));
    let mut sink = WebmSink::new(WebmSinkOpts::new(dir.join("out.webm")));
    let err = sink
        .begin(SinkConfig {
            width: 4,
            height: 4,
            fps: 12,
        })
        .unwrap_err();
    assert!(matches!(err, StickframeError::Unavailable(_)));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = WebmSink::new(WebmSinkOpts::new("unused.webm"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(0, &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn encoder_args_describe_raw_rgba_to_vp9() {
    let cfg = SinkConfig {
        width: 320,
        height: 240,
        fps: 8,
    };
    let mut opts = WebmSinkOpts::new("out/walk.webm");
    let args: Vec<String> = encoder_args(&cfg, &opts)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    assert_eq!(args[0], "-y");
    let after = |flag: &str| {
        let i = args.iter().position(|a| a == flag).unwrap();
        args[i + 1].clone()
    };
    assert_eq!(after("-s"), "320x240");
    assert_eq!(after("-r"), "8");
    assert_eq!(after("-c:v"), "libvpx-vp9");
    assert_eq!(after("-crf"), "32");
    assert_eq!(args.last().map(String::as_str), Some("out/walk.webm"));

    opts.overwrite = false;
    assert_eq!(encoder_args(&cfg, &opts)[0], "-n");
}
