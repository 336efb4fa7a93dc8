use super::*;

#[test]
fn seek_then_wait_makes_the_frame_visible() {
    let mut dec = ScriptedDecoder::new(4, 4, Some(2.0));
    assert_eq!(dec.current_frame_rgba8().unwrap(), None);

    dec.begin_seek(0.5).unwrap();
    assert_eq!(
        dec.wait_seek(Duration::from_millis(200)),
        SeekOutcome::Completed
    );
    let frame = dec.current_frame_rgba8().unwrap().unwrap();
    assert_eq!(frame.len(), 4 * 4 * 4);
    assert_eq!(dec.seek_times(), &[0.5]);
}

#[test]
fn stalled_seek_keeps_previous_frame_visible() {
    let mut dec = ScriptedDecoder::new(4, 4, Some(2.0)).with_stalled_seek(1);

    dec.begin_seek(0.0).unwrap();
    dec.wait_seek(Duration::from_millis(200));
    let first = dec.current_frame_rgba8().unwrap().unwrap();

    dec.begin_seek(1.0).unwrap();
    assert_eq!(
        dec.wait_seek(Duration::from_millis(200)),
        SeekOutcome::TimedOut
    );
    let second = dec.current_frame_rgba8().unwrap().unwrap();
    assert_eq!(first, second, "timed-out seek must reuse the visible frame");
}

#[test]
fn omission_and_failure_are_distinct() {
    let mut dec = ScriptedDecoder::new(4, 4, Some(2.0))
        .with_omitted_frame(0)
        .with_failing_frame(1);

    dec.begin_seek(0.0).unwrap();
    dec.wait_seek(Duration::from_millis(200));
    assert_eq!(dec.current_frame_rgba8().unwrap(), None);

    dec.begin_seek(1.0).unwrap();
    dec.wait_seek(Duration::from_millis(200));
    assert!(dec.current_frame_rgba8().is_err());
}

#[test]
fn release_is_counted_and_clears_state() {
    let mut dec = ScriptedDecoder::new(4, 4, Some(2.0));
    dec.begin_seek(0.0).unwrap();
    dec.wait_seek(Duration::from_millis(200));
    dec.release();
    dec.release();
    assert_eq!(dec.release_count(), 2);
    assert_eq!(dec.current_frame_rgba8().unwrap(), None);
}
