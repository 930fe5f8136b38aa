//! The main cooperative loop
//!
//! [`Appliance`] owns every subsystem and the board's peripherals. Each
//! call to [`Appliance::step`] runs one loop iteration in a fixed order:
//!
//! 1. Sample the buttons once; the sample serves every decision below
//! 2. Safety interlock: out of the water the actuators go dark at once
//! 3. Wake-on-press; a press that wakes the display is consumed
//! 4. Menu-return and backlight timeouts, wet or dry
//! 5. Not-immersed screen, then the iteration ends
//! 6. Throttled menu poll
//! 7. Temperature harvest and actuator update
//! 8. Display refresh
//! 9. Network service while the link is up, then status publication
//!
//! Nothing in the loop blocks; every wait is an interval check.

use sousvide_hal::ConfigStorage;

use crate::clock::{Clock, TimerId};
use crate::config::{ConfigStore, ControllerConfig, NetworkConfig};
use crate::context::ControllerContext;
use crate::control::{ActuatorCommand, ClosedLoopController};
use crate::menu::{self, Screen};
use crate::state::{Action, MenuEvent, OperatingState};
use crate::temperature::{Harvest, TemperatureCoordinator};
use crate::tick::SharedStatus;
use crate::traits::{
    ButtonPanel, CharDisplay, EffortController, HeaterOutput, NetworkInterface, PumpOutput,
    SystemControl, TemperatureBus,
};
use crate::web::{Routed, WebResponder};

/// The concrete collaborators of one board
pub trait Board {
    type Buttons: ButtonPanel;
    type Display: CharDisplay;
    type Heater: HeaterOutput;
    type Pump: PumpOutput;
    type Sensors: TemperatureBus;
    type Net: NetworkInterface;
    type Storage: ConfigStorage;
    type System: SystemControl;
    /// Control law turning temperature error into heater effort
    type Law: EffortController;
}

/// Peripherals handed to the appliance at boot
pub struct Peripherals<B: Board> {
    pub buttons: B::Buttons,
    pub display: B::Display,
    pub heater: B::Heater,
    pub pump: B::Pump,
    pub sensors: B::Sensors,
    pub net: B::Net,
    pub system: B::System,
}

/// The sous vide appliance
pub struct Appliance<B: Board> {
    io: Peripherals<B>,
    store: ConfigStore<B::Storage>,
    config: ControllerConfig,
    ctx: ControllerContext,
    coordinator: TemperatureCoordinator,
    controller: ClosedLoopController<B::Law>,
    screen: Screen,
    web: WebResponder,
    status: Option<&'static SharedStatus>,
}

impl<B: Board> Appliance<B> {
    /// Boot the appliance
    ///
    /// Restores the persisted network configuration and target
    /// temperature, falling back to defaults if storage cannot be read,
    /// and starts the first temperature conversion.
    pub fn new(
        mut io: Peripherals<B>,
        storage: B::Storage,
        law: B::Law,
        config: ControllerConfig,
        now_ms: u32,
    ) -> Self {
        let mut store = ConfigStore::new(storage);

        let network = store.load_network().unwrap_or_else(|e| {
            error!("loading network config failed: {}", e);
            NetworkConfig::default()
        });
        let desired_x10 = store.load_setpoint(&config).unwrap_or_else(|e| {
            error!("loading target temperature failed: {}", e);
            config.default_setpoint_x10
        });

        io.heater.set_effort(0);
        io.pump.set_enabled(false);
        if let Err(e) = io.display.set_backlight(true) {
            warn!("display backlight: {}", e);
        }

        let mut ctx = ControllerContext::new(now_ms, desired_x10, network);
        let mut coordinator = TemperatureCoordinator::new(config.resolution_bits);
        coordinator.request_conversion(&mut io.sensors, &mut ctx.timers, now_ms);

        info!(
            "sous vide ready, target {=i16} x0.1C, {=usize} sensors",
            desired_x10,
            io.sensors.channel_count()
        );

        Self {
            io,
            store,
            controller: ClosedLoopController::new(law, config.cutoff_temp_x10),
            config,
            ctx,
            coordinator,
            screen: Screen::new(),
            web: WebResponder::new(),
            status: None,
        }
    }

    /// Publish the operating state to `status` after every iteration
    pub fn with_status(mut self, status: &'static SharedStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Run one iteration at the clock's current time
    pub fn poll<C: Clock>(&mut self, clock: &C) {
        self.step(clock.now_ms());
    }

    /// Run one iteration at `now_ms`
    pub fn step(&mut self, now_ms: u32) {
        if self.ctx.op_state == OperatingState::Unknown {
            self.shut_down();
            self.publish();
            return;
        }

        self.ctx.buttons = self.io.buttons.read();
        menu::advance_rotation(&mut self.ctx, &self.config, now_ms);

        let immersed = self.ctx.immersed();
        if !immersed {
            self.drive(ActuatorCommand::OFF);
        }

        if self.wake(now_ms) {
            self.publish();
            return;
        }

        if menu::check_menu_timeout(&mut self.ctx, &self.config, now_ms) {
            self.screen.mark_dirty();
        }
        self.housekeeping(now_ms);

        if !immersed {
            self.not_immersed(now_ms);
            self.publish();
            return;
        }

        let polled = self
            .ctx
            .timers
            .run_if_due(TimerId::Action, now_ms, self.config.action_interval_ms);
        if polled {
            let action = menu::poll(&mut self.ctx, &self.config);
            self.perform(action);
            if self.ctx.op_state == OperatingState::Unknown {
                self.shut_down();
                self.publish();
                return;
            }
        }

        if self.coordinator.read_all(&mut self.io.sensors, &mut self.ctx.timers, now_ms)
            == Harvest::Failed
        {
            debug!("temperature harvest failed, keeping previous sample");
        }
        let current_x10 = self.coordinator.sample().current_x10();
        let command = self.controller.update(
            self.ctx.op_state,
            true,
            current_x10,
            self.ctx.setpoint.desired_x10(),
        );
        self.drive(command);

        if polled || self.ctx.prev_op_state != Some(self.ctx.op_state) {
            self.refresh_display(current_x10);
        }

        self.service_network(now_ms);
        self.publish();
    }

    /// The single writer of heater and pump
    fn drive(&mut self, command: ActuatorCommand) {
        if command != self.ctx.command {
            trace!(
                "actuators: heater {=u8}, pump {=bool}",
                command.heater_effort,
                command.pump_enabled
            );
        }
        if command == ActuatorCommand::OFF {
            self.controller.disengage();
        }
        self.io.heater.set_effort(command.heater_effort);
        self.io.pump.set_enabled(command.pump_enabled);
        self.ctx.command = command;
    }

    /// Turn the backlight on for a user press; true if the press was used
    /// up by waking the display
    fn wake(&mut self, now_ms: u32) -> bool {
        if !self.ctx.buttons.is_user_press() {
            return false;
        }

        self.ctx.timers.reset(TimerId::ButtonActivity, now_ms);
        if self.io.display.backlight_on() {
            return false;
        }

        debug!("wake from backlight off");
        if let Err(e) = self.io.display.set_backlight(true) {
            warn!("display backlight: {}", e);
        }
        self.ctx.timers.reset(TimerId::Action, now_ms);
        self.ctx.hold.reset();
        self.screen.mark_dirty();
        if let Err(e) = self.screen.flush(&mut self.io.display) {
            warn!("display write: {}", e);
        }
        true
    }

    fn not_immersed(&mut self, now_ms: u32) {
        if !self
            .ctx
            .timers
            .run_if_due(TimerId::Action, now_ms, self.config.action_interval_ms)
        {
            return;
        }

        if self.ctx.op_state != OperatingState::Off
            && MenuEvent::from_buttons(self.ctx.buttons) == Some(MenuEvent::Ok)
        {
            debug!("turned off while out of the water");
            if self.ctx.op_state == OperatingState::MenuTempSetup {
                self.ctx.setpoint.discard();
            }
            self.ctx.op_state = OperatingState::Off;
        }

        menu::render_not_immersed(&self.ctx, &mut self.screen);
        // Redraw the state screen once the device is back in the water
        self.ctx.prev_op_state = None;
        if let Err(e) = self.screen.flush(&mut self.io.display) {
            warn!("display write: {}", e);
        }
    }

    /// Carry out the side effects the menu leaves to the loop
    fn perform(&mut self, action: Action) {
        match action {
            Action::CommitEdit | Action::ApplyPreset => {
                let desired_x10 = self.ctx.setpoint.desired_x10();
                match self.store.save_setpoint(desired_x10) {
                    Ok(()) => info!("target temperature {=i16} x0.1C saved", desired_x10),
                    Err(e) => error!("saving target temperature failed: {}", e),
                }
            }
            Action::ForceOff => {
                info!("device turned off");
                self.drive(ActuatorCommand::OFF);
            }
            Action::Shutdown => self.ctx.enter_unknown(),
            _ => {}
        }
    }

    fn refresh_display(&mut self, current_x10: Option<i16>) {
        if self.ctx.prev_op_state != Some(self.ctx.op_state) {
            self.screen.mark_dirty();
            self.ctx.prev_op_state = Some(self.ctx.op_state);
        }
        menu::render(&self.ctx, current_x10, &mut self.screen);
        if let Err(e) = self.screen.flush(&mut self.io.display) {
            warn!("display write: {}", e);
        }
    }

    fn service_network(&mut self, now_ms: u32) {
        let up = self.io.net.link_up();
        if up != self.ctx.link_up {
            self.ctx.link_up = up;
            if up {
                info!("link up");
                if let Err(e) = self.io.net.configure(&self.ctx.network) {
                    warn!("network configuration failed: {}", e);
                }
            } else {
                info!("link down");
            }
        }
        if !up {
            return;
        }

        match self.web.service(
            &mut self.io.net,
            &mut self.ctx,
            &mut self.coordinator,
            &mut self.io.sensors,
            &mut self.store,
            now_ms,
        ) {
            Ok(Routed::Restart) => self.io.system.restart(),
            Ok(_) => {}
            Err(e) => warn!("web request failed: {}", e),
        }
    }

    fn housekeeping(&mut self, now_ms: u32) {
        if self.io.display.backlight_on()
            && self
                .ctx
                .timers
                .due(TimerId::ButtonActivity, now_ms, self.config.backlight_timeout_ms)
        {
            debug!("backlight timeout");
            if let Err(e) = self.io.display.set_backlight(false) {
                warn!("display backlight: {}", e);
            }
        }
    }

    /// Terminal state: everything dark, no further transitions
    fn shut_down(&mut self) {
        self.drive(ActuatorCommand::OFF);
        if self.io.display.backlight_on() {
            if let Err(e) = self.io.display.set_backlight(false) {
                warn!("display backlight: {}", e);
            }
        }
    }

    fn publish(&self) {
        if let Some(status) = self.status {
            status.publish(
                self.ctx.op_state,
                self.ctx.op_state.heater_allowed() && self.ctx.immersed(),
            );
        }
    }

    pub fn context(&self) -> &ControllerContext {
        &self.ctx
    }

    /// Mutable context access, e.g. to inject a corrupted state
    pub fn context_mut(&mut self) -> &mut ControllerContext {
        &mut self.ctx
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn temperatures(&self) -> &TemperatureCoordinator {
        &self.coordinator
    }

    pub fn peripherals(&self) -> &Peripherals<B> {
        &self.io
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<B> {
        &mut self.io
    }

    pub fn store(&self) -> &ConfigStore<B::Storage> {
        &self.store
    }
}
