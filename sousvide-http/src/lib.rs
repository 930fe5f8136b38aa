//! Embedded web responder wire layer
//!
//! This crate turns the TCP payload of a received packet into a structured
//! [`Request`] and renders the controller's small set of pages back into a
//! text buffer. It knows nothing about sockets, sensors or storage; the
//! control core feeds it bytes and values and sends the rendered text.
//!
//! # Surface
//!
//! ```text
//! GET  /          → 200 home page with links built from the Host header
//! GET  /temp      → 200 `name=value <br>` per temperature channel
//! GET  /ipconfig  → 200 form pre-filled with the network settings
//! POST /ipconfig  → form submission (`dhcp|ip|gw|dns|subnet`)
//! GET  <other>    → 404 echoing the path
//! anything else   → 401
//! ```
//!
//! Recognition is deliberately lax: this is not an HTTP/1.1 implementation,
//! only enough of one for a browser on the local network.

#![no_std]
#![deny(unsafe_code)]

pub mod addr;
pub mod dedup;
pub mod form;
pub mod pages;
pub mod request;
pub mod response;

pub use addr::{parse_ipv4, subnet_mask_valid, AddrError, DottedQuad};
pub use dedup::{Disposition, SequenceDedup};
pub use form::{FormError, IpConfigForm, IpSettings};
pub use pages::Escaped;
pub use request::{Header, Method, ParseError, Request, MAX_HEADERS, MAX_HOST_LEN};
pub use response::{RenderError, Response, Status};
