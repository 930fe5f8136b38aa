//! `/ipconfig` form body parsing
//!
//! The body is `&`-joined `key=value` pairs. Recognized keys are `dhcp`,
//! `ip`, `gw`, `dns` and `subnet`; anything else is ignored. A submission
//! is accepted or rejected as a whole.

use crate::addr::{parse_ipv4, subnet_mask_valid, AddrError};

/// Errors from parsing a form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormError {
    /// Body has no recognized key
    Empty,
    /// A pair is missing its `=`
    Malformed,
    /// An address field failed to parse
    Address(AddrError),
    /// Subnet mask ones are not contiguous
    InvalidSubnet,
}

impl From<AddrError> for FormError {
    fn from(e: AddrError) -> Self {
        FormError::Address(e)
    }
}

/// Network addressing as shown on and edited through the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IpSettings {
    /// Obtain address by DHCP instead of the static fields
    pub dhcp: bool,
    pub ip: [u8; 4],
    pub netmask: [u8; 4],
    pub gateway: [u8; 4],
    pub dns: [u8; 4],
}

/// A validated form submission
///
/// Address fields are `None` when absent from the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IpConfigForm {
    /// Checkbox present in the body
    pub dhcp: bool,
    pub ip: Option<[u8; 4]>,
    pub gateway: Option<[u8; 4]>,
    pub dns: Option<[u8; 4]>,
    pub subnet: Option<[u8; 4]>,
}

impl IpConfigForm {
    /// Parse and validate a form body
    pub fn parse(body: &str) -> Result<Self, FormError> {
        let mut form = Self::default();
        let mut recognized = false;

        for pair in body.trim().split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or(FormError::Malformed)?;
            let value = value.trim();

            match key.trim() {
                "dhcp" => form.dhcp = true,
                "ip" => form.ip = Some(parse_ipv4(value)?),
                "gw" => form.gateway = Some(parse_ipv4(value)?),
                "dns" => form.dns = Some(parse_ipv4(value)?),
                "subnet" => {
                    let mask = parse_ipv4(value)?;
                    if !subnet_mask_valid(mask) {
                        return Err(FormError::InvalidSubnet);
                    }
                    form.subnet = Some(mask);
                }
                _ => continue,
            }
            recognized = true;
        }

        if recognized {
            Ok(form)
        } else {
            Err(FormError::Empty)
        }
    }

    /// Settings that result from applying this submission to `current`
    ///
    /// An unchecked box means static addressing.
    pub fn apply(&self, current: &IpSettings) -> IpSettings {
        IpSettings {
            dhcp: self.dhcp,
            ip: self.ip.unwrap_or(current.ip),
            netmask: self.subnet.unwrap_or(current.netmask),
            gateway: self.gateway.unwrap_or(current.gateway),
            dns: self.dns.unwrap_or(current.dns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: IpSettings = IpSettings {
        dhcp: true,
        ip: [192, 168, 1, 200],
        netmask: [255, 255, 255, 0],
        gateway: [192, 168, 1, 1],
        dns: [192, 168, 1, 1],
    };

    #[test]
    fn test_full_static_submission() {
        let form =
            IpConfigForm::parse("ip=10.0.0.5&subnet=255.255.0.0&gw=10.0.0.1&dns=8.8.8.8").unwrap();
        assert!(!form.dhcp);

        let next = form.apply(&CURRENT);
        assert_eq!(
            next,
            IpSettings {
                dhcp: false,
                ip: [10, 0, 0, 5],
                netmask: [255, 255, 0, 0],
                gateway: [10, 0, 0, 1],
                dns: [8, 8, 8, 8],
            }
        );
    }

    #[test]
    fn test_dhcp_checkbox_any_value() {
        assert!(IpConfigForm::parse("dhcp=on").unwrap().dhcp);
        assert!(IpConfigForm::parse("dhcp=").unwrap().dhcp);
    }

    #[test]
    fn test_absent_fields_keep_current() {
        let form = IpConfigForm::parse("dhcp=1&ip=192.168.1.50").unwrap();
        let next = form.apply(&CURRENT);
        assert!(next.dhcp);
        assert_eq!(next.ip, [192, 168, 1, 50]);
        assert_eq!(next.netmask, CURRENT.netmask);
        assert_eq!(next.gateway, CURRENT.gateway);
        assert_eq!(next.dns, CURRENT.dns);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let form = IpConfigForm::parse("submit=Save&ip=10.1.1.1").unwrap();
        assert_eq!(form.ip, Some([10, 1, 1, 1]));
    }

    #[test]
    fn test_trailing_ampersand_and_newline() {
        let form = IpConfigForm::parse("ip=10.1.1.1&\r\n").unwrap();
        assert_eq!(form.ip, Some([10, 1, 1, 1]));
    }

    #[test]
    fn test_rejects_non_contiguous_subnet() {
        assert_eq!(
            IpConfigForm::parse("ip=10.0.0.5&subnet=255.0.255.0"),
            Err(FormError::InvalidSubnet)
        );
    }

    #[test]
    fn test_rejects_bad_address() {
        assert_eq!(
            IpConfigForm::parse("ip=10.0.0.256"),
            Err(FormError::Address(AddrError::OctetOutOfRange))
        );
        assert_eq!(
            IpConfigForm::parse("gw=10.0.0"),
            Err(FormError::Address(AddrError::WrongOctetCount))
        );
    }

    #[test]
    fn test_one_bad_field_rejects_whole_body() {
        assert!(IpConfigForm::parse("dhcp=on&ip=10.0.0.5&dns=abc").is_err());
    }

    #[test]
    fn test_malformed_and_empty() {
        assert_eq!(IpConfigForm::parse("ip"), Err(FormError::Malformed));
        assert_eq!(IpConfigForm::parse(""), Err(FormError::Empty));
        assert_eq!(IpConfigForm::parse("foo=bar"), Err(FormError::Empty));
    }
}
