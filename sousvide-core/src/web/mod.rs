//! Embedded web responder

mod router;

pub use router::{Routed, WebError, WebResponder, RESPONSE_LEN, RX_LEN};
