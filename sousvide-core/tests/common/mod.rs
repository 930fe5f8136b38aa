//! Simulated board for driving the appliance loop on the host

#![allow(dead_code)]

use std::collections::VecDeque;

use sousvide_core::config::{ControllerConfig, NetworkConfig};
use sousvide_core::traits::{
    ButtonPanel, CharDisplay, DisplayError, EffortController, HeaterOutput, NetError,
    NetworkInterface, PumpOutput, ReceivedPacket, SensorError, SystemControl, TemperatureBus,
    LCD_ROWS,
};
use sousvide_core::{Appliance, Board, ButtonEvent, Peripherals};
use sousvide_hal::RamStorage;

pub struct SimButtons {
    pub pressed: ButtonEvent,
}

impl ButtonPanel for SimButtons {
    fn read(&mut self) -> ButtonEvent {
        self.pressed
    }
}

pub struct SimDisplay {
    pub lines: [String; LCD_ROWS],
    pub backlight: bool,
    pub writes: u32,
}

impl CharDisplay for SimDisplay {
    fn print_lines(&mut self, lines: &[&str; LCD_ROWS]) -> Result<(), DisplayError> {
        for (dst, src) in self.lines.iter_mut().zip(lines) {
            *dst = src.to_string();
        }
        self.writes += 1;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        Ok(())
    }

    fn backlight_on(&self) -> bool {
        self.backlight
    }
}

pub struct SimHeater {
    pub effort: u8,
}

impl HeaterOutput for SimHeater {
    fn set_effort(&mut self, effort: u8) {
        self.effort = effort;
    }

    fn effort(&self) -> u8 {
        self.effort
    }
}

pub struct SimPump {
    pub on: bool,
}

impl PumpOutput for SimPump {
    fn set_enabled(&mut self, on: bool) {
        self.on = on;
    }

    fn is_enabled(&self) -> bool {
        self.on
    }
}

pub struct SimSensors {
    pub readings: Vec<Result<i16, SensorError>>,
    pub conversions: u32,
}

impl TemperatureBus for SimSensors {
    fn channel_count(&self) -> usize {
        self.readings.len()
    }

    fn channel_name(&self, index: usize) -> &str {
        ["TemperatureSensor1", "TemperatureSensor2", "TemperatureSensor3", "TemperatureSensor4"]
            [index]
    }

    fn resolution_bits(&self) -> u8 {
        11
    }

    fn request_conversion(&mut self) {
        self.conversions += 1;
    }

    fn read_channel_x10(&mut self, index: usize) -> Result<i16, SensorError> {
        self.readings[index]
    }
}

pub struct SimNet {
    pub link: bool,
    pub inbox: VecDeque<(u32, Vec<u8>)>,
    pub sent: Vec<String>,
    pub configured: Option<NetworkConfig>,
}

impl SimNet {
    pub fn deliver(&mut self, sequence: u32, payload: &str) {
        self.inbox.push_back((sequence, payload.as_bytes().to_vec()));
    }

    pub fn last_reply(&self) -> &str {
        self.sent.last().map(String::as_str).unwrap_or("")
    }
}

impl NetworkInterface for SimNet {
    fn link_up(&mut self) -> bool {
        self.link
    }

    fn configure(&mut self, config: &NetworkConfig) -> Result<(), NetError> {
        self.configured = Some(*config);
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Option<ReceivedPacket> {
        let (sequence, payload) = self.inbox.pop_front()?;
        let len = payload.len().min(buf.len());
        buf[..len].copy_from_slice(&payload[..len]);
        Some(ReceivedPacket { len, sequence })
    }

    fn reply(&mut self, data: &[u8]) -> Result<(), NetError> {
        self.sent.push(String::from_utf8_lossy(data).into_owned());
        Ok(())
    }

    fn local_ip(&self) -> [u8; 4] {
        self.configured.map_or([0; 4], |c| c.ip)
    }
}

pub struct SimSystem {
    pub restarts: u32,
}

impl SystemControl for SimSystem {
    fn restart(&mut self) {
        self.restarts += 1;
    }
}

/// Proportional law: 10 effort per tenth of a degree below the target
pub struct SimLaw {
    pub resets: u32,
}

impl EffortController for SimLaw {
    fn compute(&mut self, input_x10: i16, setpoint_x10: i16) -> i32 {
        (i32::from(setpoint_x10) - i32::from(input_x10)) * 10
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

pub struct SimBoard;

impl Board for SimBoard {
    type Buttons = SimButtons;
    type Display = SimDisplay;
    type Heater = SimHeater;
    type Pump = SimPump;
    type Sensors = SimSensors;
    type Net = SimNet;
    type Storage = RamStorage<32>;
    type System = SimSystem;
    type Law = SimLaw;
}

pub fn peripherals() -> Peripherals<SimBoard> {
    Peripherals {
        buttons: SimButtons {
            pressed: ButtonEvent::NONE,
        },
        display: SimDisplay {
            lines: [String::new(), String::new()],
            backlight: false,
            writes: 0,
        },
        heater: SimHeater { effort: 0 },
        pump: SimPump { on: false },
        sensors: SimSensors {
            readings: vec![Ok(550), Ok(570)],
            conversions: 0,
        },
        net: SimNet {
            link: false,
            inbox: VecDeque::new(),
            sent: Vec::new(),
            configured: None,
        },
        system: SimSystem { restarts: 0 },
    }
}

/// An appliance on the simulated board plus a clock to drive it
pub struct Sim {
    pub appliance: Appliance<SimBoard>,
    pub now_ms: u32,
}

impl Sim {
    pub fn boot() -> Self {
        Self::boot_with(RamStorage::new())
    }

    pub fn boot_with(storage: RamStorage<32>) -> Self {
        let appliance = Appliance::new(
            peripherals(),
            storage,
            SimLaw { resets: 0 },
            ControllerConfig::default(),
            0,
        );
        Self {
            appliance,
            now_ms: 0,
        }
    }

    pub fn io(&mut self) -> &mut Peripherals<SimBoard> {
        self.appliance.peripherals_mut()
    }

    pub fn set_buttons(&mut self, pressed: ButtonEvent) {
        self.io().buttons.pressed = pressed;
    }

    /// Advance the clock and run one iteration
    pub fn run_for(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
        self.appliance.step(self.now_ms);
    }

    /// One throttled poll with `pressed` held, then release
    pub fn press(&mut self, pressed: ButtonEvent) {
        let liquid = self.appliance.context().immersed();
        let mut held = pressed;
        held.set(ButtonEvent::LIQUID_PRESENT, liquid);
        self.set_buttons(held);
        self.run_for(200);
        let mut released = ButtonEvent::NONE;
        released.set(ButtonEvent::LIQUID_PRESENT, liquid);
        self.set_buttons(released);
        self.run_for(200);
    }

    pub fn line(&self, row: usize) -> &str {
        &self.appliance.peripherals().display.lines[row]
    }
}
