//! Cooking presets offered by the preset menu

/// A named target temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Preset {
    /// Display label, at most 16 characters
    pub name: &'static str,
    pub temp_x10: i16,
}

/// Built-in presets, in menu order
pub const PRESETS: &[Preset] = &[
    Preset { name: "Beef rare", temp_x10: 540 },
    Preset { name: "Beef medium", temp_x10: 580 },
    Preset { name: "Pork chop", temp_x10: 600 },
    Preset { name: "Chicken breast", temp_x10: 640 },
    Preset { name: "Salmon", temp_x10: 500 },
    Preset { name: "Soft egg", temp_x10: 630 },
    Preset { name: "Vegetables", temp_x10: 850 },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;

    #[test]
    fn test_presets_fit_display_and_range() {
        let config = ControllerConfig::default();
        assert!(!PRESETS.is_empty());
        for preset in PRESETS {
            assert!(preset.name.len() <= 16);
            assert_eq!(config.clamp_setpoint(preset.temp_x10), preset.temp_x10);
        }
    }
}
