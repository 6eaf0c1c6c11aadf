//! Resolution cycle dispatcher.
//!
//! [`ThemeEngine`] is the context object that owns the collaborators. Each
//! change reads a fresh preference snapshot, plans the cycle with
//! [`effects`](super::effects) and executes the resulting effects.
//!
//! Collaborators may call back into the engine while a cycle runs (writing
//! the corrected size fires a change notification, for instance). Such
//! re-entrant calls are not executed recursively: they are coalesced into a
//! single follow-up cycle that runs once the current one has finished.
//!
//! Icon script runs go through the same dispatcher so that a remembered
//! icon theme or any other store write they cause is handled the same way.

use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use tracing::{debug, info, warn};

use super::collaborators::{
    read_preferences, IconScript, IconThemeSource, LayoutSource, Notifier, SettingsStore,
    SettingsUi, ThemeApplier,
};
use super::effects::{self, CyclePlan, Effect, NOTICE_TITLE};
use super::icons::{self, IconPlan};
use crate::models::{IconMode, Preferences, SettingKey};

/// Message shown after a successful icon run that printed nothing.
pub const ICONS_DONE: &str = "Done!";

/// Icon theme lookup and the icon script.
pub struct IconTools {
    /// Desktop icon theme
    pub theme: Box<dyn IconThemeSource>,
    /// Replacement script
    pub script: Box<dyn IconScript>,
}

/// The external parts a [`ThemeEngine`] drives.
pub struct Collaborators {
    /// Preference storage
    pub settings: Box<dyn SettingsStore>,
    /// Desktop button layout
    pub layout: Box<dyn LayoutSource>,
    /// User notices
    pub notifier: Box<dyn Notifier>,
    /// Theme sink
    pub applier: Box<dyn ThemeApplier>,
    /// Settings window, if one is running
    pub settings_ui: Option<Box<dyn SettingsUi>>,
    /// Icon replacement support, if configured
    pub icons: Option<IconTools>,
}

/// What happened to a change handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// A cycle ran; holds the plan of the last cycle executed
    Applied(Box<CyclePlan>),
    /// A cycle was already running; the change will be picked up by its follow-up
    Coalesced,
}

/// Owns the collaborators and runs resolution cycles.
pub struct ThemeEngine {
    collaborators: RefCell<Collaborators>,
    cycle_active: Cell<bool>,
    pending: Cell<bool>,
}

/// Clears the in-flight flag when a cycle ends, including on early return.
struct CycleGuard<'a>(&'a Cell<bool>);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl ThemeEngine {
    /// Creates an engine around `collaborators`.
    #[must_use]
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators: RefCell::new(collaborators),
            cycle_active: Cell::new(false),
            pending: Cell::new(false),
        }
    }

    /// Returns true while a cycle is executing.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.cycle_active.get()
    }

    /// Reads the current preference snapshot.
    ///
    /// Returns `None` when called from inside a running cycle.
    #[must_use]
    pub fn preferences(&self) -> Option<Preferences> {
        let collaborators = self.collaborators.try_borrow().ok()?;
        Some(read_preferences(
            collaborators.settings.as_ref(),
            collaborators.layout.as_ref(),
        ))
    }

    /// Runs a full cycle from the stored preferences.
    pub fn refresh(&self) -> Result<ChangeOutcome> {
        self.dispatch(None)
    }

    /// Handles a change notification for `key`, whose new value is `value`.
    ///
    /// The store is expected to hold `value` already.
    pub fn on_change(&self, key: SettingKey, value: &str) -> Result<ChangeOutcome> {
        self.dispatch(Some((key, value)))
    }

    /// Writes `value` under `key` and handles the resulting change.
    ///
    /// Fails when called from inside a running cycle, where the store is
    /// already in use. A change signal the store fires for this write is
    /// absorbed by the cycle that follows it.
    pub fn update(&self, key: SettingKey, value: &str) -> Result<ChangeOutcome> {
        if self.cycle_active.replace(true) {
            anyhow::bail!("Cannot store setting '{key}' while a theme cycle is running");
        }
        {
            let _guard = CycleGuard(&self.cycle_active);
            self.collaborators
                .borrow_mut()
                .settings
                .set(key, value)
                .with_context(|| format!("Failed to store setting '{key}'"))?;
        }
        self.pending.set(false);
        self.on_change(key, value)
    }

    /// Runs the icon script for `mode` against the selected or detected
    /// icon theme.
    ///
    /// A rejected request (no icon theme, no style) is announced through the
    /// notifier and returned with an empty `request`. Fails when the script
    /// cannot be run or exits unsuccessfully.
    pub fn run_icons(&self, mode: IconMode) -> Result<IconPlan> {
        if self.cycle_active.replace(true) {
            anyhow::bail!("Cannot run the icon script while a theme cycle is running");
        }
        let _guard = CycleGuard(&self.cycle_active);

        let plan = {
            let mut collaborators = self.collaborators.borrow_mut();
            let prefs = read_preferences(
                collaborators.settings.as_ref(),
                collaborators.layout.as_ref(),
            );
            let detected = collaborators
                .icons
                .as_ref()
                .and_then(|tools| tools.theme.current());

            let plan = icons::plan_icons(mode, &prefs, detected.as_deref());
            debug!(%mode, request = ?plan.request, "planned icon run");
            for effect in &plan.effects {
                execute(&mut collaborators, effect)?;
            }
            plan
        };

        while self.pending.replace(false) {
            debug!("running follow-up cycle after icon run");
            self.run_cycle(None)?;
        }
        Ok(plan)
    }

    /// Consumes the engine and hands back its collaborators.
    #[must_use]
    pub fn into_collaborators(self) -> Collaborators {
        self.collaborators.into_inner()
    }

    fn dispatch(&self, change: Option<(SettingKey, &str)>) -> Result<ChangeOutcome> {
        if self.cycle_active.replace(true) {
            debug!(?change, "cycle in progress, coalescing change");
            self.pending.set(true);
            return Ok(ChangeOutcome::Coalesced);
        }
        let _guard = CycleGuard(&self.cycle_active);

        let mut plan = self.run_cycle(change)?;
        while self.pending.replace(false) {
            debug!("running follow-up cycle for coalesced changes");
            plan = self.run_cycle(None)?;
        }

        Ok(ChangeOutcome::Applied(Box::new(plan)))
    }

    fn run_cycle(&self, change: Option<(SettingKey, &str)>) -> Result<CyclePlan> {
        let mut collaborators = self.collaborators.borrow_mut();
        let prefs = read_preferences(
            collaborators.settings.as_ref(),
            collaborators.layout.as_ref(),
        );

        let plan = match change {
            Some((key, value)) => {
                debug!(%key, value, "planning change");
                effects::on_change(&prefs, key, value)
            }
            None => effects::plan_cycle(&prefs),
        };

        for effect in &plan.effects {
            execute(&mut collaborators, effect)?;
        }

        info!(
            application = %plan.application.path,
            shell = %plan.shell.path,
            size = %plan.effective_size,
            "theme cycle complete"
        );
        Ok(plan)
    }
}

fn execute(collaborators: &mut Collaborators, effect: &Effect) -> Result<()> {
    match effect {
        Effect::PersistSize { style, size } => {
            // The cycle already uses the corrected size; a failed write only
            // means the correction repeats next time.
            if let Err(e) = collaborators
                .settings
                .set(SettingKey::Size(*style), size.as_str())
            {
                warn!("Failed to persist corrected size for {style}: {e:#}");
            }
        }
        Effect::Notify { title, message } => collaborators.notifier.notify(title, message),
        Effect::RestartSettingsUi => {
            if let Some(ui) = collaborators.settings_ui.as_mut() {
                if let Err(e) = ui.restart() {
                    warn!("Failed to restart settings window: {e:#}");
                }
            }
        }
        Effect::Apply { application, shell } => {
            if let Err(e) = collaborators.applier.apply(application, shell) {
                collaborators
                    .notifier
                    .notify_error(NOTICE_TITLE, &format!("Failed to apply theme: {e:#}"));
                return Err(e.context("Failed to apply theme"));
            }
        }
        Effect::NotifyError { title, message } => {
            collaborators.notifier.notify_error(title, message);
        }
        Effect::StoreIconTheme { theme } => {
            if let Err(e) = collaborators.settings.set(SettingKey::IconTheme, theme) {
                warn!("Failed to remember icon theme {theme}: {e:#}");
            }
        }
        Effect::RunIconScript(request) => {
            let Some(tools) = collaborators.icons.as_mut() else {
                anyhow::bail!("Icon replacement is not configured");
            };

            let output = match tools.script.run(request) {
                Ok(output) => output,
                Err(e) => {
                    collaborators.notifier.notify_error(NOTICE_TITLE, &format!("{e:#}"));
                    return Err(e.context("Failed to run icon script"));
                }
            };

            if !output.success {
                let message = if output.stderr.is_empty() {
                    "Script failed".to_string()
                } else {
                    format!("Script failed: {}", output.stderr)
                };
                collaborators.notifier.notify_error(NOTICE_TITLE, &message);
                anyhow::bail!(message);
            }

            let message = if output.stdout.is_empty() {
                ICONS_DONE
            } else {
                output.stdout.as_str()
            };
            collaborators.notifier.notify(NOTICE_TITLE, message);
            if let Err(e) = tools.theme.refresh(&request.target) {
                warn!("Failed to reload icon theme {}: {e:#}", request.target);
            }
        }
    }
    Ok(())
}
