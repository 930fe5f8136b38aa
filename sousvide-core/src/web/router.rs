//! Request routing with retransmission suppression
//!
//! A payload whose transport sequence number equals the previous one is a
//! client retransmission and gets a bare `200` without being parsed. Every
//! other payload is tokenized and dispatched on method and path.
//!
//! The router never touches the actuators. A successful reconfiguration is
//! reported as [`Routed::Restart`] and the caller performs the restart
//! after the reply has gone out.

use core::fmt;

use sousvide_hal::ConfigStorage;
use sousvide_http::{
    pages, Disposition, IpConfigForm, Method, RenderError, Request, Response, SequenceDedup,
    Status,
};

use crate::config::ConfigStore;
use crate::context::ControllerContext;
use crate::temperature::{TemperatureCoordinator, Tenths};
use crate::traits::{NetError, NetworkInterface, TemperatureBus};

/// Receive buffer size
pub const RX_LEN: usize = 1024;

/// Response buffer size
pub const RESPONSE_LEN: usize = 2048;

type Page = Response<RESPONSE_LEN>;

/// Errors while answering a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WebError {
    /// Page did not fit the response buffer
    Render(RenderError),
    /// Reply could not be sent
    Net(NetError),
}

impl From<RenderError> for WebError {
    fn from(e: RenderError) -> Self {
        WebError::Render(e)
    }
}

impl From<fmt::Error> for WebError {
    fn from(_: fmt::Error) -> Self {
        WebError::Render(RenderError::Overflow)
    }
}

impl From<NetError> for WebError {
    fn from(e: NetError) -> Self {
        WebError::Net(e)
    }
}

/// What one service call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Routed {
    /// Nothing was received
    Idle,
    /// Retransmission answered with a bare ack
    Duplicate,
    /// Request answered with this status
    Served(Status),
    /// New network configuration persisted; restart the device
    Restart,
}

/// One channel value on the temperature page
struct Reading(Option<i16>);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => write!(f, "{}", Tenths(t)),
            None => f.write_str("n/a"),
        }
    }
}

/// The web responder
pub struct WebResponder {
    dedup: SequenceDedup,
    rx: [u8; RX_LEN],
}

impl WebResponder {
    pub const fn new() -> Self {
        Self {
            dedup: SequenceDedup::new(),
            rx: [0; RX_LEN],
        }
    }

    /// Sequence number of the last payload handled
    pub fn last_sequence(&self) -> Option<u32> {
        self.dedup.previous()
    }

    /// Handle at most one received payload
    pub fn service<N, B, S>(
        &mut self,
        net: &mut N,
        ctx: &mut ControllerContext,
        coordinator: &mut TemperatureCoordinator,
        sensors: &mut B,
        store: &mut ConfigStore<S>,
        now_ms: u32,
    ) -> Result<Routed, WebError>
    where
        N: NetworkInterface,
        B: TemperatureBus,
        S: ConfigStorage,
    {
        let Some(packet) = net.receive(&mut self.rx) else {
            return Ok(Routed::Idle);
        };
        if packet.len == 0 {
            return Ok(Routed::Idle);
        }

        if self.dedup.observe(packet.sequence) == Disposition::Duplicate {
            debug!("retransmission seq={=u32}, bare ack", packet.sequence);
            let ack = Page::new(Status::Ok)?;
            net.reply(ack.as_bytes())?;
            return Ok(Routed::Duplicate);
        }

        let len = packet.len.min(RX_LEN);
        let (page, routed) = match Request::parse(&self.rx[..len]) {
            Ok(request) => route(&request, net, ctx, coordinator, sensors, store, now_ms)?,
            Err(e) => {
                debug!("unparseable request: {}", e);
                let mut page = Page::new(Status::Unauthorized)?;
                pages::unauthorized(&mut page)?;
                (page, Routed::Served(Status::Unauthorized))
            }
        };

        net.reply(page.as_bytes())?;
        Ok(routed)
    }
}

impl Default for WebResponder {
    fn default() -> Self {
        Self::new()
    }
}

fn route<N, B, S>(
    request: &Request<'_>,
    net: &N,
    ctx: &mut ControllerContext,
    coordinator: &mut TemperatureCoordinator,
    sensors: &mut B,
    store: &mut ConfigStore<S>,
    now_ms: u32,
) -> Result<(Page, Routed), WebError>
where
    N: NetworkInterface,
    B: TemperatureBus,
    S: ConfigStorage,
{
    let host = request.host();

    match (request.method, request.path) {
        (Method::Get, "/") => {
            let mut page = Page::new(Status::Ok)?;
            pages::home(&mut page, host)?;
            Ok((page, Routed::Served(Status::Ok)))
        }
        (Method::Get, "/temp") => {
            coordinator.read_all(sensors, &mut ctx.timers, now_ms);
            let mut page = Page::new(Status::Ok)?;
            let channels = coordinator.sample().channels();
            let sensors: &B = sensors;
            // Channels not harvested yet still get a line
            let readings = (0..sensors.channel_count()).map(|index| {
                let value = channels.get(index).copied().flatten();
                (sensors.channel_name(index), Reading(value))
            });
            pages::temperatures(&mut page, readings)?;
            Ok((page, Routed::Served(Status::Ok)))
        }
        (Method::Get, "/ipconfig") => {
            let mut page = Page::new(Status::Ok)?;
            pages::ipconfig_form(&mut page, host, &ctx.network.ip_settings())?;
            Ok((page, Routed::Served(Status::Ok)))
        }
        (Method::Post, "/ipconfig") => reconfigure(request, ctx, store),
        (Method::Get, path) => {
            let mut page = Page::new(Status::NotFound)?;
            pages::not_found(&mut page, path, net.local_ip())?;
            Ok((page, Routed::Served(Status::NotFound)))
        }
        _ => {
            let mut page = Page::new(Status::Unauthorized)?;
            pages::unauthorized(&mut page)?;
            Ok((page, Routed::Served(Status::Unauthorized)))
        }
    }
}

/// Validate, persist and acknowledge a submitted network form
///
/// Anything short of a fully valid submission that was also stored leaves
/// the configuration untouched and shows the form again.
fn reconfigure<S: ConfigStorage>(
    request: &Request<'_>,
    ctx: &mut ControllerContext,
    store: &mut ConfigStore<S>,
) -> Result<(Page, Routed), WebError> {
    let current = ctx.network.ip_settings();

    match IpConfigForm::parse(request.body) {
        Ok(form) => {
            let updated = ctx.network.with_ip_settings(&form.apply(&current));
            match store.save_network(&updated) {
                Ok(()) => {
                    info!("network config saved, restarting");
                    ctx.network = updated;
                    let mut page = Page::new(Status::Ok)?;
                    pages::reconnect_notice(&mut page)?;
                    return Ok((page, Routed::Restart));
                }
                Err(e) => error!("saving network config failed: {}", e),
            }
        }
        Err(e) => info!("network form rejected: {}", e),
    }

    let mut page = Page::new(Status::Ok)?;
    pages::ipconfig_form(&mut page, request.host(), &current)?;
    Ok((page, Routed::Served(Status::Ok)))
}
