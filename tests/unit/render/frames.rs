use super::*;
use crate::foundation::core::DisplayBox;
use crate::markup::payload::{PayloadOptions, encode_payload};
use crate::stroke::sequencer::SequencerState;
use crate::viewer::config::ViewerConfig;
use crate::viewer::controller::DisplayMode;

const SAN: &str = include_str!("../../fixtures/kanji/04e09.svg");

fn animating() -> ModeController {
    let cfg = ViewerConfig {
        display: DisplayBox {
            width: 48,
            height: 48,
        },
        ..ViewerConfig::default()
    };
    let mut ctl = ModeController::with_virtual_clock(cfg).unwrap();
    let payload = encode_payload(
        SAN,
        &PayloadOptions {
            remove_numbers: true,
        },
    );
    assert!(ctl.set_kanji('三', Some(&payload), DisplayMode::Animate));
    ctl
}

#[test]
fn frames_cover_whole_animation_at_fps() {
    let mut ctl = animating();
    let raster = Rasterizer::new(ctl.config().display);
    let mut sink = InMemorySink::new();

    let n = render_frames(&mut ctl, &raster, 20, 1_000, &mut sink).unwrap();
    assert_eq!(ctl.sequencer_state(), SequencerState::Completed);
    // 525 ms at 50 ms per frame: frames at 0, 50, ..., 550.
    assert_eq!(n, 12);
    assert_eq!(sink.frames.len(), 12);
    assert_eq!(sink.config().unwrap().fps, 20);
    let times: Vec<_> = sink.frames.iter().map(|(t, _)| t.0).collect();
    assert_eq!(times[..3], [0, 50, 100]);
    assert_eq!(*times.last().unwrap(), 550);
    assert!(sink.frames.last().unwrap().1.has_ink());
}

#[test]
fn max_frames_caps_output() {
    let mut ctl = animating();
    let raster = Rasterizer::new(ctl.config().display);
    let mut sink = InMemorySink::new();

    assert_eq!(render_frames(&mut ctl, &raster, 30, 3, &mut sink).unwrap(), 3);
    assert_eq!(ctl.sequencer_state(), SequencerState::DrawingStroke(0));
}

#[test]
fn static_presentation_is_a_single_frame() {
    let mut ctl = animating();
    ctl.colorize();
    let raster = Rasterizer::new(ctl.config().display);
    let mut sink = InMemorySink::new();
    assert_eq!(render_frames(&mut ctl, &raster, 30, 100, &mut sink).unwrap(), 1);
}

#[test]
fn zero_fps_is_rejected() {
    let mut ctl = animating();
    let raster = Rasterizer::new(ctl.config().display);
    let mut sink = InMemorySink::new();
    assert!(render_frames(&mut ctl, &raster, 0, 10, &mut sink).is_err());
}

#[test]
fn png_dir_sink_names_frames_sequentially() {
    let dir = std::path::PathBuf::from("target").join("frames_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let mut ctl = animating();
    let raster = Rasterizer::new(ctl.config().display);
    let mut sink = PngDirSink::new(&dir);
    let n = render_frames(&mut ctl, &raster, 10, 2, &mut sink).unwrap();
    assert_eq!(n, 2);
    assert_eq!(sink.written()[1], dir.join("frame_00001.png"));
    assert!(sink.written().iter().all(|p| p.is_file()));
}

fn ink(frame: &FrameRgba) -> usize {
    frame.data.chunks_exact(4).filter(|px| px[3] != 0).count()
}

#[test]
fn frames_show_strokes_being_drawn_progressively() {
    let mut ctl = ModeController::with_virtual_clock(ViewerConfig::default()).unwrap();
    let payload = encode_payload(
        SAN,
        &PayloadOptions {
            remove_numbers: true,
        },
    );
    assert!(ctl.set_kanji('三', Some(&payload), DisplayMode::Animate));
    let raster = Rasterizer::new(ctl.config().display);
    let mut sink = InMemorySink::new();

    assert_eq!(render_frames(&mut ctl, &raster, 10, 1_000, &mut sink).unwrap(), 7);
    let inks: Vec<_> = sink.frames.iter().map(|(_, f)| ink(f)).collect();
    assert_eq!(inks[0], 0, "{inks:?}");
    assert!(inks.windows(2).all(|w| w[0] <= w[1]), "{inks:?}");
    assert!(inks[inks.len() - 1] > inks[1], "{inks:?}");
}
