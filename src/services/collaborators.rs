//! Interfaces to the outside world.
//!
//! The resolution core never touches settings, the desktop or the file
//! system itself. It reads and writes through these traits, which the
//! binary (or a test) implements.

use anyhow::Result;
use tracing::{debug, error, info};

use crate::models::{IconRequest, Preferences, SettingKey, ThemePath};

/// Key/value preference storage.
///
/// Change subscription belongs to whoever binds the store to the desktop:
/// that binding forwards each change to
/// [`ThemeEngine::on_change`](super::engine::ThemeEngine::on_change).
pub trait SettingsStore {
    /// Current value of `key`, `None` if unset.
    fn get(&self, key: SettingKey) -> Option<String>;

    /// Writes `value` under `key`.
    fn set(&mut self, key: SettingKey, value: &str) -> Result<()>;
}

/// Source of the desktop's window-button layout.
pub trait LayoutSource {
    /// Raw layout descriptor, e.g. `close,maximize,minimize:`.
    fn button_layout(&self) -> Option<String>;
}

/// User-facing notices.
pub trait Notifier {
    /// Informational notice.
    fn notify(&mut self, title: &str, message: &str);

    /// Failure notice.
    fn notify_error(&mut self, title: &str, message: &str);
}

/// Sink for resolved theme paths.
pub trait ThemeApplier {
    /// Applies the application and shell theme paths.
    fn apply(&mut self, application: &ThemePath, shell: &ThemePath) -> Result<()>;
}

/// The external settings window, restarted after a correction so it shows
/// the repaired value.
pub trait SettingsUi {
    /// Restarts the settings window.
    fn restart(&mut self) -> Result<()>;
}

/// Desktop icon theme lookup and reload.
pub trait IconThemeSource {
    /// Icon theme the desktop currently uses, `None` if unknown.
    fn current(&self) -> Option<String>;

    /// Makes the desktop reload `theme` so replaced icons show up.
    fn refresh(&mut self, theme: &str) -> Result<()>;
}

/// What an icon script run printed and whether it succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    /// True on a zero exit status
    pub success: bool,
    /// Trimmed standard output
    pub stdout: String,
    /// Trimmed standard error
    pub stderr: String,
}

/// Runs the symbolic icon replacement script.
pub trait IconScript {
    /// Runs the script for `request`. An `Err` means it could not be started.
    fn run(&mut self, request: &IconRequest) -> Result<ScriptOutput>;
}

/// Reads a full preference snapshot.
///
/// The desktop's button layout and the store's `button-layout` key are
/// kept apart; [`Preferences::layout`] picks between them.
pub fn read_preferences(store: &dyn SettingsStore, layout: &dyn LayoutSource) -> Preferences {
    let mut prefs = Preferences {
        color: store.get(SettingKey::Color).unwrap_or_default(),
        transparency: store.get(SettingKey::Transparency).unwrap_or_default(),
        window_controls: store.get(SettingKey::WindowControls).unwrap_or_default(),
        shell_color: store.get(SettingKey::ShellColor).unwrap_or_default(),
        shell_transparency: store.get(SettingKey::ShellTransparency).unwrap_or_default(),
        shell_window_controls: store.get(SettingKey::ShellWindowControls),
        desktop_layout: layout.button_layout(),
        button_layout: store.get(SettingKey::ButtonLayout),
        controls_style: store.get(SettingKey::ControlsStyle),
        arrows_style: store.get(SettingKey::ArrowsStyle),
        icon_theme: store.get(SettingKey::IconTheme),
        ..Preferences::default()
    };

    for style in crate::models::WindowControls::ALL {
        prefs
            .sizes
            .set(style, store.get(SettingKey::Size(style)).unwrap_or_default());
    }

    prefs
}

/// A layout source with a fixed answer.
#[derive(Debug, Clone, Default)]
pub struct StaticLayoutSource(Option<String>);

impl StaticLayoutSource {
    /// Creates a source that always reports `layout`.
    #[must_use]
    pub fn new(layout: Option<String>) -> Self {
        Self(layout)
    }
}

impl LayoutSource for StaticLayoutSource {
    fn button_layout(&self) -> Option<String> {
        self.0.clone()
    }
}

/// An icon theme source with a fixed answer and no reload.
#[derive(Debug, Clone, Default)]
pub struct StaticIconTheme(Option<String>);

impl StaticIconTheme {
    /// Creates a source that always reports `theme`.
    #[must_use]
    pub fn new(theme: Option<String>) -> Self {
        Self(theme)
    }
}

impl IconThemeSource for StaticIconTheme {
    fn current(&self) -> Option<String> {
        self.0.clone()
    }

    fn refresh(&mut self, theme: &str) -> Result<()> {
        debug!(theme, "icon theme reload skipped");
        Ok(())
    }
}

/// Notifier that logs notices and echoes them on stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    /// Creates a notifier; `quiet` suppresses the stderr echo.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, title: &str, message: &str) {
        info!(title, message, "notice");
        if !self.quiet {
            eprintln!("{title} {message}");
        }
    }

    fn notify_error(&mut self, title: &str, message: &str) {
        error!(title, message, "error notice");
        if !self.quiet {
            eprintln!("Error: {title} {message}");
        }
    }
}

/// Applier that prints both paths on stdout.
#[derive(Debug, Default)]
pub struct PrintApplier;

impl ThemeApplier for PrintApplier {
    fn apply(&mut self, application: &ThemePath, shell: &ThemePath) -> Result<()> {
        println!("gtk-theme: {application}");
        println!("shell-theme: {shell}");
        Ok(())
    }
}

/// Hands the paths to every applier in order, stopping at the first failure.
impl ThemeApplier for Vec<Box<dyn ThemeApplier>> {
    fn apply(&mut self, application: &ThemePath, shell: &ThemePath) -> Result<()> {
        for applier in self.iter_mut() {
            applier.apply(application, shell)?;
        }
        Ok(())
    }
}
