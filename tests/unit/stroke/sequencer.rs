use super::*;
use crate::markup::loader::parse_markup;
use crate::schedule::timeline::VirtualClock;
use crate::stroke::measure::prepare_strokes;

const SAN: &str = include_str!("../../fixtures/kanji/04e09.svg");
const TPD: u64 = 15;

fn prepared() -> Element {
    let mut root = parse_markup(SAN).unwrap();
    prepare_strokes(&mut root);
    root
}

fn run_until(seq: &mut StrokeSequencer, root: &mut Element, clock: &mut VirtualClock, until: u64) {
    while let Some(id) = clock.next_due(Millis(until)) {
        seq.on_timer(id, Some(&mut *root), clock);
    }
}

fn offsets(root: &Element) -> Vec<u32> {
    strokes(root).iter().map(|s| s.offset().unwrap()).collect()
}

#[test]
fn phases_are_sequential_and_proportional_to_length() {
    let mut root = prepared();
    let mut clock = VirtualClock::new();
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());

    assert_eq!(seq.start(&mut root, &mut clock), SequencerState::DrawingStroke(0));
    run_until(&mut seq, &mut root, &mut clock, 10_000);

    assert_eq!(seq.state(), SequencerState::Completed);
    let phases = seq.phases();
    assert_eq!(phases.len(), 3);
    assert_eq!(
        phases.iter().map(|p| p.duration_ms).collect::<Vec<_>>(),
        vec![150, 75, 300]
    );
    assert_eq!(
        phases.iter().map(|p| p.started_at.0).collect::<Vec<_>>(),
        vec![0, 150, 225]
    );
    for pair in phases.windows(2) {
        assert!(pair[1].started_at >= pair[0].ended_at.unwrap());
    }
    assert_eq!(phases[2].ended_at, Some(Millis(525)));
    assert_eq!(offsets(&root), vec![0, 0, 0]);
    assert_eq!(clock.armed(), 0);
}

#[test]
fn offset_drops_one_unit_per_tick() {
    let mut root = prepared();
    let mut clock = VirtualClock::new();
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());
    seq.start(&mut root, &mut clock);

    for k in 1..10u32 {
        run_until(&mut seq, &mut root, &mut clock, u64::from(k) * TPD);
        assert_eq!(offsets(&root)[0], 10 - k);
    }
    assert_eq!(seq.state(), SequencerState::DrawingStroke(0));

    run_until(&mut seq, &mut root, &mut clock, 150);
    assert_eq!(seq.state(), SequencerState::DrawingStroke(1));
    assert_eq!(offsets(&root), vec![0, 5, 20]);
}

#[test]
fn halting_mid_stroke_freezes_offsets() {
    let mut root = prepared();
    let mut clock = VirtualClock::new();
    let token = CancelToken::new();
    let mut seq = StrokeSequencer::new(TPD, token.clone());
    seq.start(&mut root, &mut clock);

    run_until(&mut seq, &mut root, &mut clock, 180);
    assert_eq!(seq.state(), SequencerState::DrawingStroke(1));

    token.cancel();
    assert!(seq.halt(&mut clock));
    assert_eq!(seq.state(), SequencerState::Cancelled);

    let frozen = offsets(&root);
    assert_eq!(frozen[0], 0);
    assert!(frozen[1] > 0 && frozen[1] < 5, "{frozen:?}");
    assert_eq!(frozen[2], 20);

    run_until(&mut seq, &mut root, &mut clock, 10_000);
    assert_eq!(offsets(&root), frozen);
    assert_eq!(clock.armed(), 0);
    assert_eq!(seq.phases().len(), 2);
    assert_eq!(seq.phases()[1].ended_at, None);
}

#[test]
fn cancelled_token_stops_on_next_timer() {
    let mut root = prepared();
    let mut clock = VirtualClock::new();
    let token = CancelToken::new();
    let mut seq = StrokeSequencer::new(TPD, token.clone());
    seq.start(&mut root, &mut clock);

    run_until(&mut seq, &mut root, &mut clock, 45);
    token.cancel();
    run_until(&mut seq, &mut root, &mut clock, 10_000);

    assert_eq!(seq.state(), SequencerState::Cancelled);
    assert_eq!(offsets(&root), vec![7, 5, 20]);
    assert!(!seq.is_running());
}

#[test]
fn halt_without_pending_step_is_noop() {
    let mut clock = VirtualClock::new();
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());
    assert!(!seq.halt(&mut clock));
    assert_eq!(seq.state(), SequencerState::Idle);
}

#[test]
fn empty_sequence_completes_immediately() {
    let mut root = parse_markup("<svg><g/></svg>").unwrap();
    let mut clock = VirtualClock::new();
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());
    assert_eq!(seq.start(&mut root, &mut clock), SequencerState::Completed);
    assert_eq!(clock.armed(), 0);
}

#[test]
fn terminal_sequencer_cannot_restart() {
    let mut root = prepared();
    let mut clock = VirtualClock::new();
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());
    seq.start(&mut root, &mut clock);
    run_until(&mut seq, &mut root, &mut clock, 10_000);
    assert_eq!(seq.start(&mut root, &mut clock), SequencerState::Completed);
    assert_eq!(seq.phases().len(), 3);
}

#[test]
fn zero_length_strokes_complete_without_ticking() {
    let mut root = parse_markup(
        r#"<svg><path d="M0,0"/><path d="M0,0 L2,0"/></svg>"#,
    )
    .unwrap();
    prepare_strokes(&mut root);
    let mut clock = VirtualClock::new();
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());
    seq.start(&mut root, &mut clock);

    run_until(&mut seq, &mut root, &mut clock, 0);
    assert_eq!(seq.state(), SequencerState::DrawingStroke(1));
    run_until(&mut seq, &mut root, &mut clock, 30);
    assert_eq!(seq.state(), SequencerState::Completed);
}

#[test]
fn foreign_timers_are_ignored() {
    let mut root = prepared();
    let mut clock = VirtualClock::new();
    let other = clock.set_timeout(1);
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());
    seq.start(&mut root, &mut clock);
    assert!(!seq.on_timer(other, Some(&mut root), &mut clock));
}

#[test]
fn removed_tree_halts_session() {
    let mut root = prepared();
    let mut clock = VirtualClock::new();
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());
    seq.start(&mut root, &mut clock);
    let id = clock.next_due(Millis(15)).unwrap();
    assert!(seq.on_timer(id, None, &mut clock));
    assert_eq!(seq.state(), SequencerState::Cancelled);
}

#[test]
fn nested_strokes_draw_in_their_own_turn() {
    let mut root = parse_markup(
        r#"<svg><path d="M0,0 L10,0"><path d="M0,0 L5,0"/></path><path d="M0,0 L20,0"/></svg>"#,
    )
    .unwrap();
    prepare_strokes(&mut root);
    let mut clock = VirtualClock::new();
    let mut seq = StrokeSequencer::new(TPD, CancelToken::new());
    seq.start(&mut root, &mut clock);

    run_until(&mut seq, &mut root, &mut clock, 150);
    assert_eq!(seq.state(), SequencerState::DrawingStroke(1));
    assert_eq!(offsets(&root), vec![0, 5, 20]);

    run_until(&mut seq, &mut root, &mut clock, 180);
    assert_eq!(offsets(&root), vec![0, 3, 20]);

    run_until(&mut seq, &mut root, &mut clock, 10_000);
    assert_eq!(seq.state(), SequencerState::Completed);
    assert_eq!(offsets(&root), vec![0, 0, 0]);
    assert_eq!(seq.phases()[2].started_at, Millis(225));
}
