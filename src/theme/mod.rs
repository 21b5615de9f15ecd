use console::Style;
use log::info;

use crate::error::Result;
use crate::store::Storage;

/// Persisted key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// The two display modes. Anything other than a stored `"dark"` reads as
/// light, matching the persisted default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    fn from_stored(value: &str) -> Self {
        if value == "dark" { Mode::Dark } else { Mode::Light }
    }

    fn flipped(&self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }

    /// Toggle indicator: the moon invites dark mode, the sun invites light.
    pub fn indicator(&self) -> &'static str {
        match self {
            Mode::Light => "\u{263E}",
            Mode::Dark => "\u{2600}",
        }
    }

    /// Card background RGB, used as the donut hole color.
    pub fn card_background(&self) -> [u8; 3] {
        match self {
            Mode::Light => [0xff, 0xff, 0xff],
            Mode::Dark => [0x1e, 0x29, 0x3b],
        }
    }

    /// Terminal styles for this mode.
    pub fn palette(&self) -> Palette {
        match self {
            Mode::Light => Palette {
                heading: Style::new().blue().bold(),
                success: Style::new().green(),
                error: Style::new().red(),
                info: Style::new().cyan(),
                muted: Style::new().dim(),
            },
            Mode::Dark => Palette {
                heading: Style::new().bright().blue().bold(),
                success: Style::new().bright().green(),
                error: Style::new().bright().red(),
                info: Style::new().bright().cyan(),
                muted: Style::new().white().dim(),
            },
        }
    }
}

/// Styles used for CLI output, resolved per mode.
#[derive(Debug, Clone)]
pub struct Palette {
    pub heading: Style,
    pub success: Style,
    pub error: Style,
    pub info: Style,
    pub muted: Style,
}

/// Reads and writes the persisted theme preference. Purely presentational;
/// never touches poll data.
pub struct ThemeManager<S: Storage> {
    storage: S,
}

impl<S: Storage> ThemeManager<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current mode, defaulting to light when nothing is persisted.
    pub fn current(&self) -> Result<Mode> {
        Ok(self
            .storage
            .load(THEME_KEY)?
            .map(|raw| Mode::from_stored(&raw))
            .unwrap_or_default())
    }

    /// Flip the mode, persist it, and return the new mode.
    pub fn toggle(&mut self) -> Result<Mode> {
        let mode = self.current()?.flipped();
        self.storage.save(THEME_KEY, mode.as_str())?;
        info!("theme set to {}", mode.as_str());
        Ok(mode)
    }
}
