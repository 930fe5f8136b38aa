//! Menu behavior on top of the operating-state table
//!
//! Applies transitions and their edit side effects to the
//! [`ControllerContext`], handles the inactivity timeouts and the message
//! rotation, and renders each state into a [`Screen`].

pub mod messages;
pub mod screen;

pub use screen::Screen;

use sousvide_http::DottedQuad;

use crate::clock::TimerId;
use crate::config::{ControllerConfig, PRESETS};
use crate::context::ControllerContext;
use crate::state::{Action, MenuEvent, OperatingState};
use crate::temperature::Tenths;

use messages::{rotate, CELSIUS};

/// Feed one event to the state machine and apply its edit side effects
///
/// Actuator side effects (`ForceOff`, `Shutdown`) and persistence of a new
/// target are left to the caller, which gets the action back.
pub fn apply_event(
    ctx: &mut ControllerContext,
    config: &ControllerConfig,
    event: MenuEvent,
) -> Action {
    let transition = ctx.op_state.transition(event);

    match transition.action {
        Action::BeginEdit => ctx.setpoint.begin_edit(),
        Action::CommitEdit => {
            ctx.setpoint.commit();
        }
        Action::DiscardEdit => ctx.setpoint.discard(),
        Action::Increment => {
            let step = config.edit_step_x10(ctx.hold.count());
            ctx.setpoint.adjust(step, config);
        }
        Action::Decrement => {
            let step = config.edit_step_x10(ctx.hold.count());
            ctx.setpoint.adjust(-step, config);
        }
        Action::NextPreset => ctx.step_preset(true),
        Action::PrevPreset => ctx.step_preset(false),
        Action::ApplyPreset => {
            if let Some(preset) = PRESETS.get(ctx.preset_cursor) {
                ctx.setpoint.set_desired(config.clamp_setpoint(preset.temp_x10));
            }
        }
        Action::None | Action::ForceOff | Action::Shutdown => {}
    }

    if transition.next != ctx.op_state {
        debug!("state {} -> {}", ctx.op_state, transition.next);
        ctx.op_state = transition.next;
    }

    transition.action
}

/// One throttled poll of the menu with this iteration's button sample
///
/// Accounts the hold counter first so the edit step of this poll already
/// reflects it.
pub fn poll(ctx: &mut ControllerContext, config: &ControllerConfig) -> Action {
    ctx.hold.update(ctx.buttons);

    match MenuEvent::from_buttons(ctx.buttons) {
        Some(event) => apply_event(ctx, config, event),
        None => Action::None,
    }
}

/// Fall back to the default screen after a period without presses
///
/// Does nothing while the device is off or already on the default screen.
/// An edit in progress is discarded. Returns true if the state changed.
pub fn check_menu_timeout(
    ctx: &mut ControllerContext,
    config: &ControllerConfig,
    now_ms: u32,
) -> bool {
    if !ctx.op_state.times_out()
        || !ctx
            .timers
            .due(TimerId::ButtonActivity, now_ms, config.menu_return_timeout_ms)
    {
        return false;
    }

    if ctx.op_state == OperatingState::MenuTempSetup {
        ctx.setpoint.discard();
    }
    debug!("menu timeout, {} -> default", ctx.op_state);
    ctx.op_state = OperatingState::DEFAULT;
    true
}

/// Advance the alternating-message counter when its period is over
pub fn advance_rotation(ctx: &mut ControllerContext, config: &ControllerConfig, now_ms: u32) {
    if ctx
        .timers
        .run_if_due(TimerId::Rotation, now_ms, config.rotation_interval_ms)
    {
        ctx.rotation = ctx.rotation.wrapping_add(1);
    }
}

/// Render the screen for a device that is out of the water
pub fn render_not_immersed(ctx: &ControllerContext, screen: &mut Screen) {
    if ctx.op_state == OperatingState::Off {
        screen.show(&messages::PUT_IN_WATER);
    } else {
        screen.show(&rotate(&messages::NOT_IMMERSED, ctx.rotation));
    }
}

/// Render the current state
///
/// `current_x10` is the control temperature, if any.
pub fn render(ctx: &ControllerContext, current_x10: Option<i16>, screen: &mut Screen) {
    match ctx.op_state {
        OperatingState::Off => screen.show(&messages::PRESS_OK_TO_START),
        OperatingState::DisplayTemp => {
            if ctx.rotation % 2 == 0 {
                screen.set_line(0, messages::CURRENT_TEMP);
                match current_x10 {
                    Some(t) => temperature_line(screen, t),
                    None => screen.set_line_fmt(1, format_args!("--.- {}", CELSIUS)),
                }
            } else {
                screen.set_line(0, messages::TARGET_TEMP);
                temperature_line(screen, ctx.setpoint.desired_x10());
            }
        }
        OperatingState::MenuTurnOff => screen.show(&messages::MENU_TURN_OFF),
        OperatingState::MenuTemp => screen.show(&messages::MENU_TEMP),
        OperatingState::MenuTempSetup => {
            screen.set_line(0, messages::SET_TARGET_TEMP);
            temperature_line(screen, ctx.setpoint.temporary_x10());
        }
        OperatingState::MenuPreset => screen.show(&messages::MENU_PRESET),
        OperatingState::MenuPresetChoose => match PRESETS.get(ctx.preset_cursor) {
            Some(preset) => {
                screen.set_line(0, preset.name);
                temperature_line(screen, preset.temp_x10);
            }
            None => screen.show(&["No presets", ""]),
        },
        OperatingState::MenuNetSettings => screen.show(&messages::MENU_NET_SETTINGS),
        OperatingState::MenuNetSettingsShow => render_network(ctx, screen),
        OperatingState::Unknown => screen.show(&["", ""]),
    }
}

fn temperature_line(screen: &mut Screen, temp_x10: i16) {
    screen.set_line_fmt(1, format_args!("{} {}", Tenths(temp_x10), CELSIUS));
}

fn render_network(ctx: &ControllerContext, screen: &mut Screen) {
    let net = &ctx.network;
    match ctx.rotation % 5 {
        0 => {
            screen.set_line(0, "IP address");
            screen.set_line_fmt(1, format_args!("{}", DottedQuad(net.ip)));
        }
        1 => {
            screen.set_line(0, "Netmask");
            screen.set_line_fmt(1, format_args!("{}", DottedQuad(net.netmask)));
        }
        2 => {
            screen.set_line(0, "Gateway");
            screen.set_line_fmt(1, format_args!("{}", DottedQuad(net.gateway)));
        }
        3 => {
            screen.set_line(0, "DNS server");
            screen.set_line_fmt(1, format_args!("{}", DottedQuad(net.dns)));
        }
        _ => {
            screen.set_line(0, "Address mode");
            screen.set_line(1, if net.dhcp() { "DHCP" } else { "Static" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::input::ButtonEvent;

    fn running_ctx(state: OperatingState) -> ControllerContext {
        let mut ctx = ControllerContext::new(0, 600, NetworkConfig::default());
        ctx.op_state = state;
        ctx
    }

    fn press(ctx: &mut ControllerContext, config: &ControllerConfig, buttons: ButtonEvent) -> Action {
        ctx.buttons = buttons | ButtonEvent::LIQUID_PRESENT;
        poll(ctx, config)
    }

    #[test]
    fn test_edit_and_commit() {
        let config = ControllerConfig::default();
        let mut ctx = running_ctx(OperatingState::MenuTemp);

        assert_eq!(press(&mut ctx, &config, ButtonEvent::OK), Action::BeginEdit);
        assert_eq!(ctx.op_state, OperatingState::MenuTempSetup);

        press(&mut ctx, &config, ButtonEvent::UP);
        press(&mut ctx, &config, ButtonEvent::NONE);
        press(&mut ctx, &config, ButtonEvent::UP);
        assert_eq!(ctx.setpoint.temporary_x10(), 602);
        assert_eq!(ctx.setpoint.desired_x10(), 600);

        assert_eq!(press(&mut ctx, &config, ButtonEvent::OK), Action::CommitEdit);
        assert_eq!(ctx.op_state, OperatingState::MenuTemp);
        assert_eq!(ctx.setpoint.desired_x10(), 602);
    }

    #[test]
    fn test_back_discards_edit() {
        let config = ControllerConfig::default();
        let mut ctx = running_ctx(OperatingState::MenuTempSetup);
        ctx.setpoint.begin_edit();

        press(&mut ctx, &config, ButtonEvent::DOWN);
        assert_eq!(ctx.setpoint.temporary_x10(), 599);
        assert_eq!(press(&mut ctx, &config, ButtonEvent::BACK), Action::DiscardEdit);
        assert_eq!(ctx.setpoint.temporary_x10(), 600);
        assert_eq!(ctx.op_state, OperatingState::MenuTemp);
    }

    #[test]
    fn test_step_accelerates_and_resets() {
        let config = ControllerConfig::default();
        let mut ctx = running_ctx(OperatingState::MenuTempSetup);
        ctx.setpoint.set_desired(800);
        ctx.setpoint.begin_edit();

        let mut last = ctx.setpoint.temporary_x10();
        for poll_no in 1..=(config.hold_long_polls + 1) {
            press(&mut ctx, &config, ButtonEvent::DOWN);
            let now = ctx.setpoint.temporary_x10();
            let expected = config.edit_step_x10(poll_no);
            assert_eq!(last - now, expected, "poll {}", poll_no);
            last = now;
        }
        // Poll long+1 used the largest step
        assert_eq!(config.edit_step_x10(config.hold_long_polls + 1), 20);

        // Release, then the first press is back to the smallest step
        press(&mut ctx, &config, ButtonEvent::NONE);
        let before = ctx.setpoint.temporary_x10();
        press(&mut ctx, &config, ButtonEvent::DOWN);
        assert_eq!(before - ctx.setpoint.temporary_x10(), 1);
    }

    #[test]
    fn test_edit_clamped_at_max() {
        let config = ControllerConfig::default();
        let mut ctx = running_ctx(OperatingState::MenuTemp);
        ctx.setpoint.set_desired(config.max_temp_x10);

        press(&mut ctx, &config, ButtonEvent::OK);
        for _ in 0..50 {
            press(&mut ctx, &config, ButtonEvent::UP);
            assert!(ctx.setpoint.temporary_x10() <= config.max_temp_x10);
        }
        assert_eq!(ctx.setpoint.temporary_x10(), config.max_temp_x10);
    }

    #[test]
    fn test_edit_clamped_at_min() {
        let config = ControllerConfig::default();
        let mut ctx = running_ctx(OperatingState::MenuTempSetup);
        ctx.setpoint.set_desired(config.min_temp_x10);
        ctx.setpoint.begin_edit();

        for _ in 0..50 {
            press(&mut ctx, &config, ButtonEvent::DOWN);
        }
        assert_eq!(ctx.setpoint.temporary_x10(), config.min_temp_x10);
    }

    #[test]
    fn test_apply_preset() {
        let config = ControllerConfig::default();
        let mut ctx = running_ctx(OperatingState::MenuPreset);

        press(&mut ctx, &config, ButtonEvent::OK);
        press(&mut ctx, &config, ButtonEvent::UP);
        assert_eq!(ctx.preset_cursor, 1);

        assert_eq!(press(&mut ctx, &config, ButtonEvent::OK), Action::ApplyPreset);
        assert_eq!(ctx.op_state, OperatingState::DisplayTemp);
        assert_eq!(ctx.setpoint.desired_x10(), PRESETS[1].temp_x10);
    }

    #[test]
    fn test_menu_timeout_discards_edit() {
        let config = ControllerConfig::default();
        let mut ctx = running_ctx(OperatingState::MenuTempSetup);
        ctx.setpoint.begin_edit();
        ctx.setpoint.adjust(50, &config);

        assert!(!check_menu_timeout(&mut ctx, &config, 30_000));
        assert!(check_menu_timeout(&mut ctx, &config, 30_001));
        assert_eq!(ctx.op_state, OperatingState::DEFAULT);
        assert_eq!(ctx.setpoint.temporary_x10(), 600);
        assert_eq!(ctx.setpoint.desired_x10(), 600);
    }

    #[test]
    fn test_no_timeout_when_off_or_default() {
        let config = ControllerConfig::default();
        for state in [OperatingState::Off, OperatingState::DisplayTemp] {
            let mut ctx = running_ctx(state);
            assert!(!check_menu_timeout(&mut ctx, &config, 100_000));
            assert_eq!(ctx.op_state, state);
        }
    }

    #[test]
    fn test_rotation() {
        let config = ControllerConfig::default();
        let mut ctx = running_ctx(OperatingState::DisplayTemp);
        advance_rotation(&mut ctx, &config, 2000);
        assert_eq!(ctx.rotation, 0);
        advance_rotation(&mut ctx, &config, 2001);
        assert_eq!(ctx.rotation, 1);
        advance_rotation(&mut ctx, &config, 2500);
        assert_eq!(ctx.rotation, 1);
    }

    #[test]
    fn test_render_display_temp_alternates() {
        let mut ctx = running_ctx(OperatingState::DisplayTemp);
        let mut screen = Screen::new();

        render(&ctx, Some(583), &mut screen);
        assert_eq!(screen.line(0), Some("Current Temp"));
        assert_eq!(screen.line(1), Some("58.3 C"));

        ctx.rotation = 1;
        render(&ctx, Some(583), &mut screen);
        assert_eq!(screen.line(0), Some("Target Temp"));
        assert_eq!(screen.line(1), Some("60.0 C"));
    }

    #[test]
    fn test_render_not_immersed() {
        let mut ctx = running_ctx(OperatingState::Off);
        let mut screen = Screen::new();
        render_not_immersed(&ctx, &mut screen);
        assert_eq!(screen.line(1), Some("device in water"));

        ctx.op_state = OperatingState::MenuTemp;
        ctx.rotation = 1;
        render_not_immersed(&ctx, &mut screen);
        assert_eq!(screen.line(0), Some("or press OK"));
    }

    #[test]
    fn test_render_network_rotation() {
        let mut ctx = running_ctx(OperatingState::MenuNetSettingsShow);
        let mut screen = Screen::new();

        render(&ctx, None, &mut screen);
        assert_eq!(screen.line(1), Some("192.168.1.200"));

        ctx.rotation = 4;
        render(&ctx, None, &mut screen);
        assert_eq!(screen.line(1), Some("Static"));
    }
}
