//! End-to-end dispatch tests driving a [`ShortcutEngine`] through
//! [`SimulatedInput`].

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use keychord::{ErrorReporter, ShortcutDefinition, ShortcutEngine, SimulatedInput};
use parking_lot::Mutex;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

fn setup() -> (Arc<SimulatedInput>, Arc<ShortcutEngine>) {
    init_tracing();
    let input = Arc::new(SimulatedInput::new());
    let engine = ShortcutEngine::new(input.clone());
    engine.start();
    (input, engine)
}

fn counting(
    id: &str,
    keys: &[&str],
) -> (ShortcutDefinition, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let fired = count.clone();
    let def = ShortcutDefinition::new(id, keys.iter().copied(), "", move || {
        fired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    (def, count)
}

/// Reporter that records `(shortcut_id, error message)` pairs.
#[derive(Default)]
struct CollectingReporter {
    failures: Mutex<Vec<(String, String)>>,
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, shortcut_id: &str, error: &dyn Error) {
        self.failures
            .lock()
            .push((shortcut_id.to_owned(), error.to_string()));
    }
}

#[test]
fn chord_fires_once_regardless_of_press_order() {
    let (input, engine) = setup();
    let (def, count) = counting("create", &["Meta", "K"]);
    engine.register(def).unwrap();

    input.press("Meta");
    assert!(input.press("k"));
    input.release("k");
    input.release("Meta");

    input.press("k");
    assert!(input.press("Meta"));
    input.release("Meta");
    input.release("k");

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn distinct_chords_fire_only_their_own_handler() {
    let (input, engine) = setup();
    let (create, create_count) = counting("create", &["Meta", "K"]);
    let (search, search_count) = counting("search", &["Meta", "F"]);
    engine.register(create).unwrap();
    engine.register(search).unwrap();

    input.press("Meta");
    input.press("k");
    input.release("k");
    input.release("Meta");
    assert_eq!(create_count.load(Ordering::SeqCst), 1);
    assert_eq!(search_count.load(Ordering::SeqCst), 0);

    input.press("Meta");
    input.press("f");
    assert_eq!(create_count.load(Ordering::SeqCst), 1);
    assert_eq!(search_count.load(Ordering::SeqCst), 1);
}

#[test]
fn superset_is_suppressed_until_extra_key_lifts() {
    let (input, engine) = setup();
    let (def, count) = counting("find", &["Meta", "F"]);
    engine.register(def).unwrap();

    input.press("Shift");
    input.press("Meta");
    assert!(!input.press("f")); // Meta+Shift+F held, not an exact match
    assert_eq!(count.load(Ordering::SeqCst), 0);

    input.release("Shift");
    input.release("f");
    assert!(input.press("f"));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn key_up_never_dispatches() {
    let (input, engine) = setup();
    let (def, count) = counting("save", &["Control", "S"]);
    engine.register(def).unwrap();

    input.press("Control");
    input.press("s");
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // Release back down to the exact chord state: no re-fire without a
    // fresh key-down.
    input.press("x");
    input.release("x");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn auto_repeat_refires_completed_chord() {
    let (input, engine) = setup();
    let (def, count) = counting("save", &["Control", "S"]);
    engine.register(def).unwrap();

    input.press("Control");
    input.press("s");
    assert!(input.repeat("s"));
    assert!(input.repeat("s"));
    assert_eq!(count.load(Ordering::SeqCst), 3);
    // Held set stayed a set: one release ends the chord cleanly.
    input.release("s");
    assert_eq!(engine.held_keys().len(), 1);
}

#[test]
fn first_registered_wins_on_duplicate_chords() {
    let (input, engine) = setup();
    let (first, first_count) = counting("first", &["Meta", "D"]);
    let (second, second_count) = counting("second", &["Meta", "D"]);
    engine.register(first).unwrap();
    engine.register(second).unwrap();

    input.tap_chord(&["Meta", "d"]);
    assert_eq!(first_count.load(Ordering::SeqCst), 1);
    assert_eq!(second_count.load(Ordering::SeqCst), 0);

    // Disabling the earlier entry lets the later one match.
    engine.disable("first");
    input.tap_chord(&["Meta", "d"]);
    assert_eq!(first_count.load(Ordering::SeqCst), 1);
    assert_eq!(second_count.load(Ordering::SeqCst), 1);
}

#[test]
fn replace_by_id_fires_new_handler_only() {
    let (input, engine) = setup();
    let (old, old_count) = counting("create", &["Meta", "K"]);
    engine.register(old).unwrap();

    let (new, new_count) = counting("create", &["Meta", "N"]);
    engine.register(new).unwrap();

    input.tap_chord(&["Meta", "k"]);
    input.tap_chord(&["Meta", "n"]);
    assert_eq!(old_count.load(Ordering::SeqCst), 0);
    assert_eq!(new_count.load(Ordering::SeqCst), 1);
    assert_eq!(engine.get_all().len(), 1);
}

#[test]
fn disabled_shortcut_does_not_match_or_suppress() {
    let (input, engine) = setup();
    let (def, count) = counting("find", &["Meta", "F"]);
    engine.register(def).unwrap();
    engine.disable("find");

    input.press("Meta");
    assert!(!input.press("f")); // not accepted: host default proceeds
    assert_eq!(count.load(Ordering::SeqCst), 0);
    input.release("f");

    engine.enable("find");
    assert!(input.press("f"));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn unregistered_shortcut_stops_firing() {
    let (input, engine) = setup();
    let (def, count) = counting("create", &["Meta", "K"]);
    engine.register(def).unwrap();

    input.tap_chord(&["Meta", "k"]);
    engine.unregister("create");
    input.tap_chord(&["Meta", "k"]);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(engine.get("create").is_none());
}

#[test]
fn stop_silences_and_restart_is_clean() {
    let (input, engine) = setup();
    let (def, count) = counting("create", &["Meta", "K"]);
    engine.register(def).unwrap();

    input.press("Meta");
    engine.stop();
    assert!(!input.press("k"));
    input.release("k");
    input.release("Meta");
    assert_eq!(count.load(Ordering::SeqCst), 0);

    // Restart begins with an empty held set: registry survives stop.
    engine.start();
    input.press("Meta");
    assert!(input.press("k"));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn dropped_engine_detaches_without_stop() {
    let (input, engine) = setup();
    let (def, count) = counting("create", &["Meta", "K"]);
    engine.register(def).unwrap();
    assert_eq!(input.listener_count(), 1);

    // The source holds the engine weakly: dropping the last application
    // handle detaches it even without an explicit stop.
    drop(engine);
    assert_eq!(input.listener_count(), 0);
    input.press("Meta");
    assert!(!input.press("k"));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn empty_chord_is_rejected() {
    let (_input, engine) = setup();
    let err = engine
        .register(ShortcutDefinition::new(
            "hollow",
            Vec::<&str>::new(),
            "",
            || Ok(()),
        ))
        .unwrap_err();
    assert!(err.to_string().contains("hollow"));
    assert!(engine.get("hollow").is_none());
}

#[test]
fn failing_handler_is_reported_not_propagated() {
    init_tracing();
    let input = Arc::new(SimulatedInput::new());
    let reporter = Arc::new(CollectingReporter::default());
    let engine = ShortcutEngine::with_reporter(input.clone(), reporter.clone());
    engine.start();

    engine
        .register(ShortcutDefinition::new("doomed", ["Meta", "E"], "", || {
            Err("disk full".into())
        }))
        .unwrap();
    let (ok, ok_count) = counting("fine", &["Meta", "O"]);
    engine.register(ok).unwrap();

    input.tap_chord(&["Meta", "e"]);
    input.tap_chord(&["Meta", "o"]);

    let failures = reporter.failures.lock();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "doomed");
    assert!(failures[0].1.contains("disk full"));
    assert_eq!(ok_count.load(Ordering::SeqCst), 1);
}

#[test]
fn panicking_handler_is_reported_not_propagated() {
    init_tracing();
    let input = Arc::new(SimulatedInput::new());
    let reporter = Arc::new(CollectingReporter::default());
    let engine = ShortcutEngine::with_reporter(input.clone(), reporter.clone());
    engine.start();

    engine
        .register(ShortcutDefinition::new("boomy", ["Meta", "P"], "", || {
            panic!("handler blew up")
        }))
        .unwrap();

    input.tap_chord(&["Meta", "p"]);
    // Dispatch still works afterwards.
    input.tap_chord(&["Meta", "p"]);

    let failures = reporter.failures.lock();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].0, "boomy");
    assert!(failures[0].1.contains("handler blew up"));
}

#[test]
fn raw_key_variants_normalize_to_one_chord() {
    let (input, engine) = setup();
    let (def, count) = counting("space-play", &["Control", "Space"]);
    engine.register(def).unwrap();

    input.press("Control");
    assert!(input.press(" ")); // the raw space character normalizes to "Space"
    input.release(" ");
    input.release("Control");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
