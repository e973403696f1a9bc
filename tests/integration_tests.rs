//! Integration tests for the tunes crate.
//!
//! Exercises the full pipeline: request validation, melody compilation,
//! and paced emission through the depth-3 channel sink a real consumer
//! would drain.

use tunes::{
    compile, compile_with_strength, ChannelSink, PlaybackSequencer, TuneLibrary, TuneRequest,
    STRENGTH_NORMAL,
};

#[test]
fn test_play_inline_melody_end_to_end() {
    let library = TuneLibrary::new();
    let (sink, rx) = ChannelSink::bounded();
    let mut player = PlaybackSequencer::new(sink);

    let request = TuneRequest::notation("MFT200e8a8a").unwrap().with_strength(60);
    let outcome = player.play_request(&request, &library).unwrap();
    assert_eq!(outcome.notes_published(), 3);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].frequency, 1318);
    assert_eq!(events[1].frequency, 1760);
    assert_eq!(events[2].frequency, 1760);
    assert!(events.iter().all(|e| e.strength == 60 && e.tune_id == 0));
}

#[test]
fn test_play_predefined_tune_end_to_end() {
    let library = TuneLibrary::new();
    let (sink, rx) = ChannelSink::bounded();
    let mut player = PlaybackSequencer::new(sink);

    let request = TuneRequest::predefined(2, &library).unwrap();
    player.play_request(&request, &library).unwrap();

    // Compact protocol: one event carrying the id, nothing expanded.
    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].tune_id, 2);
    assert_eq!(events[0].frequency, 0);
    assert_eq!(events[0].strength, STRENGTH_NORMAL);
}

#[test]
fn test_stop_overrides_queued_playback() {
    let library = TuneLibrary::new();
    let (sink, rx) = ChannelSink::bounded();
    let mut player = PlaybackSequencer::new(sink);

    player.play_single(1, 40, &library).unwrap();
    player.stop();

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 2);
    assert!(!events[0].tune_override);
    assert!(events[1].tune_override);
    assert_eq!(events[1].frequency, 0);
}

#[test]
fn test_invalid_requests_never_reach_the_sink() {
    let library = TuneLibrary::new();

    assert!(TuneRequest::predefined(0, &library).is_err());
    assert!(TuneRequest::predefined(library.size(), &library).is_err());
    assert!(TuneRequest::notation("T200e8a8a").is_err());

    // A melody that fails compilation inside play_request publishes
    // nothing either.
    let (sink, rx) = ChannelSink::bounded();
    let mut player = PlaybackSequencer::new(sink);
    assert!(compile("no marker").is_err());
    drop(player.play_single(0, 40, &library));
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn test_compile_strength_fallback() {
    let mut melody = compile_with_strength("MFT200e8", 100).unwrap();
    assert_eq!(melody.next().unwrap().strength, STRENGTH_NORMAL);

    let mut melody = compile_with_strength("MFT200e8", 75).unwrap();
    assert_eq!(melody.next().unwrap().strength, 75);
}

#[test]
fn test_every_library_tune_compiles() {
    let library = TuneLibrary::new();
    for id in 1..library.size() {
        let mut melody = library.resolve_predefined(id, STRENGTH_NORMAL).unwrap();
        assert!(melody.next().is_some());
    }
}
