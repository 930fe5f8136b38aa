//! State machine definition
//!
//! Heater, pump and display behavior are all a function of the current
//! operating state. Exactly one state is current at a time.

use super::events::MenuEvent;

/// Operating states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatingState {
    /// Device off, waiting for OK to start
    Off = 0,
    /// Running; current and target temperature shown
    DisplayTemp = 1,
    /// Top-level menu: turn the device off
    MenuTurnOff = 2,
    /// Top-level menu: target temperature
    MenuTemp = 3,
    /// Editing the target temperature
    MenuTempSetup = 4,
    /// Top-level menu: cooking presets
    MenuPreset = 5,
    /// Browsing the preset list
    MenuPresetChoose = 6,
    /// Top-level menu: network settings
    MenuNetSettings = 7,
    /// Showing the network settings
    MenuNetSettingsShow = 8,
    /// Corrupted control state; outputs forced off until reset
    Unknown = 0xFF,
}

/// Side effect attached to a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    None,
    /// Turn heater and pump off
    ForceOff,
    /// Copy the desired temperature into the edit buffer
    BeginEdit,
    /// Accept the edit buffer as the desired temperature
    CommitEdit,
    /// Drop the edit buffer
    DiscardEdit,
    /// Raise the edit buffer by the current step
    Increment,
    /// Lower the edit buffer by the current step
    Decrement,
    NextPreset,
    PrevPreset,
    /// Use the highlighted preset as the desired temperature
    ApplyPreset,
    /// Terminal shutdown; every output off
    Shutdown,
}

/// Result of feeding an event to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub next: OperatingState,
    pub action: Action,
}

impl Transition {
    const fn to(next: OperatingState) -> Self {
        Self {
            next,
            action: Action::None,
        }
    }

    const fn with(next: OperatingState, action: Action) -> Self {
        Self { next, action }
    }
}

impl OperatingState {
    /// Screen shown when the device runs and no menu is open
    pub const DEFAULT: OperatingState = OperatingState::DisplayTemp;

    /// Decode a raw state byte; anything unrecognized is `Unknown`
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => OperatingState::Off,
            1 => OperatingState::DisplayTemp,
            2 => OperatingState::MenuTurnOff,
            3 => OperatingState::MenuTemp,
            4 => OperatingState::MenuTempSetup,
            5 => OperatingState::MenuPreset,
            6 => OperatingState::MenuPresetChoose,
            7 => OperatingState::MenuNetSettings,
            8 => OperatingState::MenuNetSettingsShow,
            _ => OperatingState::Unknown,
        }
    }

    /// Raw state byte
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if the device is switched on
    pub fn is_running(&self) -> bool {
        !matches!(self, OperatingState::Off | OperatingState::Unknown)
    }

    /// Check if this state allows heater operation
    ///
    /// Immersion is checked separately; this only reflects the state.
    pub fn heater_allowed(&self) -> bool {
        self.is_running()
    }

    /// Check if this is one of the four ring menus
    pub fn is_top_level_menu(&self) -> bool {
        matches!(
            self,
            OperatingState::MenuTurnOff
                | OperatingState::MenuTemp
                | OperatingState::MenuPreset
                | OperatingState::MenuNetSettings
        )
    }

    /// Check if menu timeouts apply
    pub fn times_out(&self) -> bool {
        self.is_running() && *self != OperatingState::DEFAULT
    }

    /// Process an event and return the next state with its side effect
    ///
    /// The top-level menus form a ring: DOWN walks
    /// TurnOff → Temp → Preset → NetSettings → TurnOff and UP walks it
    /// backwards. `Off` accepts OK unconditionally; the caller only feeds
    /// events while the device is immersed.
    pub fn transition(self, event: MenuEvent) -> Transition {
        use Action::*;
        use MenuEvent::*;
        use OperatingState::*;

        match (self, event) {
            // Off
            (Off, Ok) => Transition::to(Self::DEFAULT),
            (Off, _) => Transition::to(Off),

            // Default screen: any key opens the menu
            (DisplayTemp, Back) => Transition::to(DisplayTemp),
            (DisplayTemp, _) => Transition::to(MenuTemp),

            // Ring menus
            (MenuTurnOff, Ok) => Transition::with(Off, ForceOff),
            (MenuTurnOff, Down) => Transition::to(MenuTemp),
            (MenuTurnOff, Up) => Transition::to(MenuNetSettings),

            (MenuTemp, Ok) => Transition::with(MenuTempSetup, BeginEdit),
            (MenuTemp, Down) => Transition::to(MenuPreset),
            (MenuTemp, Up) => Transition::to(MenuTurnOff),

            (MenuPreset, Ok) => Transition::to(MenuPresetChoose),
            (MenuPreset, Down) => Transition::to(MenuNetSettings),
            (MenuPreset, Up) => Transition::to(MenuTemp),

            (MenuNetSettings, Ok) => Transition::to(MenuNetSettingsShow),
            (MenuNetSettings, Down) => Transition::to(MenuTurnOff),
            (MenuNetSettings, Up) => Transition::to(MenuPreset),

            (MenuTurnOff | MenuTemp | MenuPreset | MenuNetSettings, Back) => {
                Transition::to(Self::DEFAULT)
            }

            // Temperature edit
            (MenuTempSetup, Ok) => Transition::with(MenuTemp, CommitEdit),
            (MenuTempSetup, Up) => Transition::with(MenuTempSetup, Increment),
            (MenuTempSetup, Down) => Transition::with(MenuTempSetup, Decrement),
            (MenuTempSetup, Back) => Transition::with(MenuTemp, DiscardEdit),

            // Preset browser
            (MenuPresetChoose, Ok) => Transition::with(Self::DEFAULT, ApplyPreset),
            (MenuPresetChoose, Up) => Transition::with(MenuPresetChoose, NextPreset),
            (MenuPresetChoose, Down) => Transition::with(MenuPresetChoose, PrevPreset),
            (MenuPresetChoose, Back) => Transition::to(MenuPreset),

            // Network settings screen
            (MenuNetSettingsShow, Ok | Back) => Transition::to(MenuNetSettings),
            (MenuNetSettingsShow, Up | Down) => Transition::to(MenuNetSettingsShow),

            // Terminal
            (Unknown, _) => Transition::with(Unknown, Shutdown),
        }
    }
}
