//! Tests for the theme engine dispatcher: collaborator wiring, re-entrant
//! change notifications and follow-up cycles.

use anyhow::Result;
use semabe::models::{IconMode, IconRequest, SettingKey, SizeToken, ThemePath, WindowControls};
use semabe::services::{
    ChangeOutcome, Collaborators, IconScript, IconTools, Notifier, ScriptOutput, SettingsStore,
    SettingsUi, StaticIconTheme, StaticLayoutSource, ThemeApplier, ThemeEngine,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

type Shared<T> = Rc<RefCell<T>>;

/// Store that forwards every write to the engine, like a desktop settings
/// backend firing change signals.
struct SignallingStore {
    values: Shared<HashMap<SettingKey, String>>,
    engine: Shared<Weak<ThemeEngine>>,
    outcomes: Shared<Vec<ChangeOutcome>>,
}

impl SettingsStore for SignallingStore {
    fn get(&self, key: SettingKey) -> Option<String> {
        self.values.borrow().get(&key).cloned()
    }

    fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        self.values.borrow_mut().insert(key, value.to_string());
        if let Some(engine) = self.engine.borrow().upgrade() {
            let outcome = engine.on_change(key, value)?;
            self.outcomes.borrow_mut().push(outcome);
        }
        Ok(())
    }
}

struct RecordingNotifier(Shared<Vec<String>>);

impl Notifier for RecordingNotifier {
    fn notify(&mut self, title: &str, message: &str) {
        self.0.borrow_mut().push(format!("{title} {message}"));
    }

    fn notify_error(&mut self, title: &str, message: &str) {
        self.0.borrow_mut().push(format!("error: {title} {message}"));
    }
}

struct RecordingApplier(Shared<Vec<(String, String)>>);

impl ThemeApplier for RecordingApplier {
    fn apply(&mut self, application: &ThemePath, shell: &ThemePath) -> Result<()> {
        self.0
            .borrow_mut()
            .push((application.to_string(), shell.to_string()));
        Ok(())
    }
}

struct CountingUi(Shared<usize>);

impl SettingsUi for CountingUi {
    fn restart(&mut self) -> Result<()> {
        *self.0.borrow_mut() += 1;
        Ok(())
    }
}

struct EchoScript(Shared<Vec<String>>);

impl IconScript for EchoScript {
    fn run(&mut self, request: &IconRequest) -> Result<ScriptOutput> {
        self.0.borrow_mut().push(request.args().join(" "));
        Ok(ScriptOutput {
            success: true,
            stdout: format!("Replaced {} icons", request.mode),
            stderr: String::new(),
        })
    }
}

struct Harness {
    engine: Rc<ThemeEngine>,
    values: Shared<HashMap<SettingKey, String>>,
    outcomes: Shared<Vec<ChangeOutcome>>,
    notices: Shared<Vec<String>>,
    applied: Shared<Vec<(String, String)>>,
    restarts: Shared<usize>,
}

fn harness(values: &[(SettingKey, &str)], layout: Option<&str>) -> Harness {
    harness_with_icons(values, layout, None)
}

fn harness_with_icons(
    values: &[(SettingKey, &str)],
    layout: Option<&str>,
    icons: Option<IconTools>,
) -> Harness {
    let values: Shared<HashMap<_, _>> = Rc::new(RefCell::new(
        values
            .iter()
            .map(|(key, value)| (*key, (*value).to_string()))
            .collect(),
    ));
    let engine_slot: Shared<Weak<ThemeEngine>> = Rc::default();
    let outcomes: Shared<Vec<ChangeOutcome>> = Rc::default();
    let notices: Shared<Vec<String>> = Rc::default();
    let applied: Shared<Vec<(String, String)>> = Rc::default();
    let restarts: Shared<usize> = Rc::default();

    let engine = Rc::new(ThemeEngine::new(Collaborators {
        settings: Box::new(SignallingStore {
            values: Rc::clone(&values),
            engine: Rc::clone(&engine_slot),
            outcomes: Rc::clone(&outcomes),
        }),
        layout: Box::new(StaticLayoutSource::new(layout.map(str::to_string))),
        notifier: Box::new(RecordingNotifier(Rc::clone(&notices))),
        applier: Box::new(RecordingApplier(Rc::clone(&applied))),
        settings_ui: Some(Box::new(CountingUi(Rc::clone(&restarts)))),
        icons,
    }));
    *engine_slot.borrow_mut() = Rc::downgrade(&engine);

    Harness {
        engine,
        values,
        outcomes,
        notices,
        applied,
        restarts,
    }
}

#[test]
fn test_reentrant_correction_is_coalesced() {
    let h = harness(
        &[
            (SettingKey::WindowControls, "legacy"),
            (SettingKey::Size(WindowControls::Legacy), "XL"),
        ],
        None,
    );

    let outcome = h.engine.refresh().unwrap();
    let ChangeOutcome::Applied(plan) = outcome else {
        panic!("top-level refresh must run a cycle");
    };

    // The store's change signal arrived mid-cycle and was deferred
    assert_eq!(*h.outcomes.borrow(), vec![ChangeOutcome::Coalesced]);

    // Exactly one notice, one settings window restart
    assert_eq!(h.notices.borrow().len(), 1);
    assert_eq!(
        h.notices.borrow()[0],
        "Unsupported size \"XL\" for style \"legacy\". Size has been reset to \"L\"."
    );
    assert_eq!(*h.restarts.borrow(), 1);

    // Correction cycle plus the follow-up, both with the repaired size
    assert_eq!(h.applied.borrow().len(), 2);
    assert_eq!(plan.effective_size, SizeToken::L);
    assert!(!plan.corrected(), "follow-up cycle must see the repaired slot");
    assert_eq!(
        h.values
            .borrow()
            .get(&SettingKey::Size(WindowControls::Legacy))
            .map(String::as_str),
        Some("L")
    );
    assert!(!h.engine.is_busy());
}

#[test]
fn test_change_outside_cycle_runs_immediately() {
    let h = harness(
        &[
            (SettingKey::WindowControls, "ambiance"),
            (SettingKey::Size(WindowControls::Ambiance), "M"),
        ],
        Some("close,maximize,minimize:"),
    );

    let outcome = h
        .engine
        .on_change(SettingKey::Color, "Coral")
        .unwrap();
    assert!(matches!(outcome, ChangeOutcome::Applied(_)));

    let applied = h.applied.borrow();
    assert_eq!(applied.len(), 1);
    assert_eq!(
        applied[0].0,
        "semabe/ambiance/left/medium/Semabe Coral Opaque (ambiance)ML"
    );
    assert_eq!(
        applied[0].1,
        "semabe/ambiance/right/large/Semabe Steel Opaque (ambiance)LR"
    );
    assert!(h.notices.borrow().is_empty());
    assert_eq!(*h.restarts.borrow(), 0);
}

#[test]
fn test_update_rejected_while_cycle_runs() {
    struct UpdatingUi(Shared<Weak<ThemeEngine>>, Shared<Vec<String>>);

    impl SettingsUi for UpdatingUi {
        fn restart(&mut self) -> Result<()> {
            if let Some(engine) = self.0.borrow().upgrade() {
                let err = engine
                    .update(SettingKey::Color, "Coral")
                    .expect_err("update must not run inside a cycle");
                self.1.borrow_mut().push(err.to_string());
            }
            Ok(())
        }
    }

    let slot: Shared<Weak<ThemeEngine>> = Rc::default();
    let errors: Shared<Vec<String>> = Rc::default();
    let mut store = HashMap::new();
    store.insert(SettingKey::WindowControls, "zephyr".to_string());
    store.insert(SettingKey::Size(WindowControls::Zephyr), "XXL".to_string());

    let engine = Rc::new(ThemeEngine::new(Collaborators {
        settings: Box::new(SignallingStore {
            values: Rc::new(RefCell::new(store)),
            engine: Rc::default(),
            outcomes: Rc::default(),
        }),
        layout: Box::new(StaticLayoutSource::default()),
        notifier: Box::new(RecordingNotifier(Rc::default())),
        applier: Box::new(RecordingApplier(Rc::default())),
        settings_ui: Some(Box::new(UpdatingUi(Rc::clone(&slot), Rc::clone(&errors)))),
        icons: None,
    }));
    *slot.borrow_mut() = Rc::downgrade(&engine);

    engine.refresh().unwrap();
    assert_eq!(errors.borrow().len(), 1);
    assert!(errors.borrow()[0].contains("while a theme cycle is running"));
}

#[test]
fn test_stored_layout_change_matches_next_refresh() {
    let h = harness(
        &[
            (SettingKey::WindowControls, "ambiance"),
            (SettingKey::Size(WindowControls::Ambiance), "M"),
        ],
        Some(":minimize,maximize,close"),
    );

    h.engine
        .update(SettingKey::ButtonLayout, "close,maximize,minimize:")
        .unwrap();
    h.engine.refresh().unwrap();

    // The desktop still reports a right-hand layout, so both cycles agree
    let applied = h.applied.borrow();
    assert_eq!(applied.len(), 2);
    assert_eq!(applied[0], applied[1]);
    assert_eq!(
        applied[0].0,
        "semabe/ambiance/right/medium/Semabe Steel Opaque (ambiance)MR"
    );
    assert_eq!(*h.outcomes.borrow(), vec![ChangeOutcome::Coalesced]);
    assert_eq!(
        h.values
            .borrow()
            .get(&SettingKey::ButtonLayout)
            .map(String::as_str),
        Some("close,maximize,minimize:")
    );
}

#[test]
fn test_stored_layout_used_without_desktop_layout() {
    let h = harness(
        &[
            (SettingKey::WindowControls, "ambiance"),
            (SettingKey::Size(WindowControls::Ambiance), "M"),
        ],
        None,
    );

    h.engine
        .update(SettingKey::ButtonLayout, "close,maximize,minimize:")
        .unwrap();
    h.engine.refresh().unwrap();

    let applied = h.applied.borrow();
    assert_eq!(applied[0], applied[1]);
    assert_eq!(
        applied[1].0,
        "semabe/ambiance/left/medium/Semabe Steel Opaque (ambiance)ML"
    );
}

#[test]
fn test_detected_icon_theme_is_stored_and_cycle_follows() {
    let runs: Shared<Vec<String>> = Rc::default();
    let icons = IconTools {
        theme: Box::new(StaticIconTheme::new(Some("Mint-Y".to_string()))),
        script: Box::new(EchoScript(Rc::clone(&runs))),
    };
    let h = harness_with_icons(
        &[
            (SettingKey::WindowControls, "legacy"),
            (SettingKey::ControlsStyle, "round"),
        ],
        None,
        Some(icons),
    );

    let plan = h.engine.run_icons(IconMode::Controls).unwrap();
    assert_eq!(plan.request.map(|r| r.target).as_deref(), Some("Mint-Y"));
    assert_eq!(*runs.borrow(), vec!["controls round Mint-Y".to_string()]);
    assert_eq!(
        h.values
            .borrow()
            .get(&SettingKey::IconTheme)
            .map(String::as_str),
        Some("Mint-Y")
    );

    // The store signalled mid-run; the change is picked up once afterwards
    assert_eq!(*h.outcomes.borrow(), vec![ChangeOutcome::Coalesced]);
    assert_eq!(h.applied.borrow().len(), 1);
    assert_eq!(
        *h.notices.borrow(),
        vec!["Semabe Theme Selector Replaced controls icons".to_string()]
    );
    assert!(!h.engine.is_busy());
}
