//! IPv4 address parsing and subnet mask validation

use core::fmt;

/// Errors from parsing an IPv4 address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddrError {
    /// Not exactly four dot-separated octets
    WrongOctetCount,
    /// Octet is empty, has a non-digit or more than three digits
    InvalidOctet,
    /// Octet value above 255
    OctetOutOfRange,
}

/// Parse a dotted-quad IPv4 address such as `192.168.1.200`
pub fn parse_ipv4(text: &str) -> Result<[u8; 4], AddrError> {
    let mut octets = [0u8; 4];
    let mut parts = text.split('.');

    for octet in octets.iter_mut() {
        let part = parts.next().ok_or(AddrError::WrongOctetCount)?;
        *octet = parse_octet(part)?;
    }

    if parts.next().is_some() {
        return Err(AddrError::WrongOctetCount);
    }

    Ok(octets)
}

fn parse_octet(part: &str) -> Result<u8, AddrError> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddrError::InvalidOctet);
    }

    let value = part
        .bytes()
        .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));

    u8::try_from(value).map_err(|_| AddrError::OctetOutOfRange)
}

/// Check that a subnet mask is a contiguous run of ones followed by zeros
///
/// Read as 32 bits MSB first, no `1` may follow a `0`. `0.0.0.0` and
/// `255.255.255.255` are both valid.
pub fn subnet_mask_valid(mask: [u8; 4]) -> bool {
    prefix_len(mask).is_some()
}

/// Prefix length of a valid subnet mask, `None` if the mask is not contiguous
pub fn prefix_len(mask: [u8; 4]) -> Option<u8> {
    let bits = u32::from_be_bytes(mask);
    let ones = bits.leading_ones();

    if ones + bits.trailing_zeros() == 32 {
        Some(ones as u8)
    } else {
        None
    }
}

/// Display wrapper printing octets as `a.b.c.d`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DottedQuad(pub [u8; 4]);

impl fmt::Display for DottedQuad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}
