use super::*;

fn inbox_with_sender() -> (FrameInbox, mpsc::Sender<LentiqResult<Option<Vec<u8>>>>) {
    let (tx, rx) = mpsc::channel();
    (FrameInbox::new(rx), tx)
}

#[test]
fn late_result_is_absorbed_on_the_next_wait() {
    let (mut inbox, tx) = inbox_with_sender();

    // First request never completes within its wait.
    inbox.mark_requested();
    assert_eq!(inbox.wait(Duration::from_millis(1)), SeekOutcome::TimedOut);
    assert_eq!(inbox.in_flight(), 1);

    // Its frame lands late, followed by the second request's frame.
    tx.send(Ok(Some(vec![1]))).unwrap();
    inbox.mark_requested();
    tx.send(Ok(Some(vec![2]))).unwrap();

    assert_eq!(
        inbox.wait(Duration::from_millis(200)),
        SeekOutcome::Completed
    );
    assert_eq!(inbox.in_flight(), 0, "the late frame was drained, not lost");
    assert_eq!(inbox.current_frame().unwrap(), Some(vec![2]));
}

#[test]
fn empty_decode_keeps_the_previous_frame_visible() {
    let (mut inbox, tx) = inbox_with_sender();

    inbox.mark_requested();
    tx.send(Ok(Some(vec![7]))).unwrap();
    inbox.wait(Duration::from_millis(200));

    // A seek past the last packet produces no frame; not a fault.
    inbox.mark_requested();
    tx.send(Ok(None)).unwrap();
    assert_eq!(
        inbox.wait(Duration::from_millis(200)),
        SeekOutcome::Completed
    );
    assert_eq!(inbox.current_frame().unwrap(), Some(vec![7]));
}

#[test]
fn empty_decode_before_any_frame_yields_none() {
    let (mut inbox, tx) = inbox_with_sender();

    inbox.mark_requested();
    tx.send(Ok(None)).unwrap();
    inbox.wait(Duration::from_millis(200));

    assert_eq!(inbox.current_frame().unwrap(), None);
}

#[test]
fn faults_surface_once_then_clear() {
    let (mut inbox, tx) = inbox_with_sender();

    inbox.mark_requested();
    tx.send(Err(LentiqError::media_load("decode failed"))).unwrap();
    inbox.wait(Duration::from_millis(200));

    assert!(inbox.current_frame().is_err());
    assert_eq!(inbox.current_frame().unwrap(), None);
}

#[test]
fn worker_disconnect_becomes_a_pending_fault() {
    let (mut inbox, tx) = inbox_with_sender();

    inbox.mark_requested();
    drop(tx);

    assert_eq!(
        inbox.wait(Duration::from_millis(200)),
        SeekOutcome::Completed
    );
    assert_eq!(inbox.in_flight(), 0);
    assert!(inbox.current_frame().is_err());
}
