//! Pattern matching and precedence.

use match_emitter::{MatchEmitter, Regex, testing::RecordingListener};
use std::{cell::RefCell, rc::Rc};

mod common;
use common::{ARG_A, ARG_B, init_tracing, noop};

#[test]
fn test_match_regular_expression() {
    let emitter = MatchEmitter::<i32>::new();
    let recorder = RecordingListener::<i32>::new();
    emitter
        .on(Regex::new("cool").unwrap(), recorder.callback())
        .unwrap();

    assert!(emitter.emit("cool", &[ARG_A, ARG_B]).unwrap());
    assert_eq!(recorder.calls(), vec![vec![ARG_A, ARG_B]]);
}

#[test]
fn test_first_expression_has_precedence() {
    init_tracing();
    let emitter = MatchEmitter::<i32>::new();
    let first = RecordingListener::<i32>::new();
    let second = RecordingListener::<i32>::new();
    second.set_error("later pattern must not be invoked");

    emitter
        .on(Regex::new("cool|awesome").unwrap(), first.callback())
        .unwrap();
    emitter.on("awe*", second.callback()).unwrap();

    assert!(emitter.emit("awesome", &[ARG_A, ARG_B]).unwrap());
    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 0);
}

#[test]
fn test_match_wildcards() {
    let emitter = MatchEmitter::<i32>::new();
    let recorder = RecordingListener::<i32>::new();
    emitter.on("coo*", recorder.callback()).unwrap();

    assert!(emitter.emit("cool", &[ARG_A, ARG_B]).unwrap());
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_match_complex_wildcards() {
    let emitter = MatchEmitter::<i32>::new();
    let recorder = RecordingListener::<i32>::new();
    emitter.on("c*lo*", recorder.callback()).unwrap();

    assert!(emitter.emit("colors", &[ARG_A, ARG_B]).unwrap());
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_wildcard_metacharacters_keep_regex_meaning() {
    let emitter = MatchEmitter::<i32>::new();
    let recorder = RecordingListener::<i32>::new();
    emitter.on("user.*", recorder.callback()).unwrap();

    // `.` is a regex wildcard, not a literal dot
    assert!(emitter.emit("userXlogin", &[]).unwrap());
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_unmatched_emit_returns_false() {
    let emitter = MatchEmitter::<i32>::new();
    emitter.on("coo*", noop()).unwrap();

    assert!(!emitter.emit("warm", &[ARG_A]).unwrap());
    assert_eq!(emitter.cached_names(), 0);

    let empty = MatchEmitter::<i32>::new();
    assert!(!empty.emit("anything", &[]).unwrap());
}

#[test]
fn test_arguments_passed_positionally() {
    let emitter = MatchEmitter::<i32>::new();
    let recorder = RecordingListener::<i32>::new();
    emitter.on("event: *", recorder.callback()).unwrap();

    emitter.emit("event: 0", &[]).unwrap();
    emitter.emit("event: 1", &[0, 1, 2]).unwrap();
    emitter.emit("event: 2", &[0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

    assert_eq!(
        recorder.calls(),
        vec![vec![], vec![0, 1, 2], (0..9).collect::<Vec<_>>()]
    );
}

#[test]
fn test_listeners_run_in_registration_order() {
    let emitter = MatchEmitter::<i32>::new();
    let order = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    for id in 1..=3 {
        emitter
            .on("tick", common::order_recording(id, &order))
            .unwrap();
    }

    emitter.emit("tick", &[]).unwrap();
    assert_eq!(
        *order.borrow(),
        vec![1, 2, 3],
        "Listeners should execute in registration order"
    );
}

#[test]
fn test_repeated_emit_is_stable() {
    let emitter = MatchEmitter::<i32>::new();
    let first = RecordingListener::<i32>::new();
    let second = RecordingListener::<i32>::new();
    emitter.on("c*", first.callback()).unwrap();
    emitter.on("co*", second.callback()).unwrap();

    for _ in 0..5 {
        assert!(emitter.emit("cool", &[]).unwrap());
        assert_eq!(emitter.resolve("cool").map(|(key, _)| key), Some("c(.*)".to_string()));
    }
    assert_eq!(first.count(), 5);
    assert_eq!(second.count(), 0);
}

#[test]
fn test_same_source_shares_slot() {
    let emitter = MatchEmitter::<i32>::new();
    let recorder = RecordingListener::<i32>::new();
    emitter.on("c*lo*", recorder.callback()).unwrap();
    emitter
        .on(Regex::new("c(.*)lo(.*)").unwrap(), recorder.callback())
        .unwrap();

    assert_eq!(emitter.pattern_count(), 1);
    assert_eq!(emitter.listener_count("c*lo*").unwrap(), 2);

    emitter.emit("colors", &[]).unwrap();
    assert_eq!(recorder.count(), 2);
}

#[test]
fn test_cache_off_agrees_with_stable_registry() {
    let cached = MatchEmitter::<i32>::new();
    let uncached = MatchEmitter::<i32>::builder().without_cache().build::<i32>();
    let a = RecordingListener::<i32>::new();
    let b = RecordingListener::<i32>::new();

    for (emitter, recorder) in [(&cached, &a), (&uncached, &b)] {
        emitter.on(Regex::new("thi(.*)s").unwrap(), recorder.callback()).unwrap();
        emitter.on("is", recorder.callback()).unwrap();
        for i in 0..3 {
            emitter.emit("this is", &[i]).unwrap();
            emitter.emit("island", &[i]).unwrap();
        }
    }

    assert_eq!(a.calls(), b.calls());
    assert_eq!(cached.cached_names(), 2);
    assert_eq!(uncached.cached_names(), 0);
}

#[test]
fn test_cache_keeps_name_from_later_exact_key() {
    let cached = MatchEmitter::<i32>::new();
    let uncached = MatchEmitter::<i32>::builder().without_cache().build::<i32>();

    let mut results = Vec::new();
    for emitter in [&cached, &uncached] {
        let wild = RecordingListener::<i32>::new();
        let exact = RecordingListener::<i32>::new();
        emitter.on("coo*", wild.callback()).unwrap();
        emitter.emit("cool", &[1]).unwrap();
        emitter.on("cool", exact.callback()).unwrap();
        emitter.emit("cool", &[2]).unwrap();
        results.push((wild.calls(), exact.calls()));
    }

    // Memoized: the earlier wildcard keeps the name
    assert_eq!(results[0], (vec![vec![1], vec![2]], vec![]));
    // Not memoized: the exact key takes over
    assert_eq!(results[1], (vec![vec![1]], vec![vec![2]]));
}

#[test]
fn test_bare_closure_registration() {
    let emitter = MatchEmitter::<i32>::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let on_seen = seen.clone();
    emitter
        .on("coo*", move |_: &MatchEmitter<i32>, args: &[i32]| {
            on_seen.borrow_mut().push(args.to_vec());
        })
        .unwrap();
    let once_seen = seen.clone();
    emitter
        .once("coo*", move |_: &MatchEmitter<i32>, args: &[i32]| {
            once_seen.borrow_mut().push(args.iter().map(|arg| -arg).collect());
        })
        .unwrap();

    assert!(emitter.emit("cool", &[ARG_A, ARG_B]).unwrap());
    assert!(emitter.emit("cool", &[ARG_A]).unwrap());
    assert_eq!(
        *seen.borrow(),
        vec![vec![ARG_A, ARG_B], vec![-ARG_A, -ARG_B], vec![ARG_A]]
    );
    assert_eq!(emitter.listener_count("coo*").unwrap(), 1);
}
