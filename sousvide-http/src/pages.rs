//! Page bodies
//!
//! Every renderer writes into any [`fmt::Write`] sink, normally a
//! [`Response`](crate::Response) that already holds the header block.
//! Links are built from the `Host` header the browser sent, so the pages
//! keep working under whatever address DHCP handed out.

use core::fmt::{self, Write};

use crate::addr::DottedQuad;
use crate::form::IpSettings;

const DOCTYPE: &str = "<!DOCTYPE HTML>\r\n";

/// Display wrapper that escapes HTML metacharacters
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '&' => f.write_str("&amp;")?,
                '"' => f.write_str("&quot;")?,
                _ => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

/// Landing page with links to the other pages
pub fn home<W: Write>(out: &mut W, host: &str) -> fmt::Result {
    let host = Escaped(host);
    out.write_str(DOCTYPE)?;
    out.write_str("<html><head><title>Sous Vide</title></head><body>\r\n")?;
    out.write_str("<h1>Sous vide controller</h1>\r\n")?;
    write!(
        out,
        "<p><a href=\"http://{}/ipconfig\">IP Configuration</a></p>",
        host
    )?;
    write!(
        out,
        "<p><a href=\"http://{}/temp\">Sensor Temperatures</a></p>\r\n",
        host
    )?;
    out.write_str("</body></html>")
}

/// One `name=value <br>` line per channel
pub fn temperatures<W, I, N, V>(out: &mut W, readings: I) -> fmt::Result
where
    W: Write,
    I: IntoIterator<Item = (N, V)>,
    N: fmt::Display,
    V: fmt::Display,
{
    for (name, value) in readings {
        write!(out, "{}={} <br>", name, value)?;
    }
    Ok(())
}

/// Network settings form pre-filled with `current`
pub fn ipconfig_form<W: Write>(out: &mut W, host: &str, current: &IpSettings) -> fmt::Result {
    out.write_str(DOCTYPE)?;
    out.write_str("<html><head><title>IP Configuration</title></head><body>")?;
    out.write_str("<form method=\"post\"><table>")?;
    write!(
        out,
        "<tr><td colspan=\"2\"><a href=\"http://{}\">Home</a></td></tr>",
        Escaped(host)
    )?;
    write!(
        out,
        "<tr><td colspan=\"2\"><input type=\"checkbox\" name=\"dhcp\" value=\"1\"{}>Use DHCP</td></tr>",
        if current.dhcp { " checked" } else { "" }
    )?;
    field(out, "IP Address", "ip", current.ip)?;
    field(out, "Subnet mask", "subnet", current.netmask)?;
    field(out, "Gateway", "gw", current.gateway)?;
    field(out, "DNS Server", "dns", current.dns)?;
    out.write_str(
        "<tr><td colspan=\"2\"><input type=\"submit\" value=\"Submit and save\"></td></tr>",
    )?;
    out.write_str("</table></form></body></html>")
}

fn field<W: Write>(out: &mut W, label: &str, name: &str, value: [u8; 4]) -> fmt::Result {
    write!(
        out,
        "<tr><td>{}:</td><td><input type=\"text\" name=\"{}\" value=\"{}\"></td></tr>",
        label,
        name,
        DottedQuad(value)
    )
}

/// Shown after new settings were saved, right before the restart
pub fn reconnect_notice<W: Write>(out: &mut W) -> fmt::Result {
    out.write_str("Please connect manually to the newly configured IP address.")
}

/// 404 body echoing the requested path
pub fn not_found<W: Write>(out: &mut W, path: &str, server_ip: [u8; 4]) -> fmt::Result {
    out.write_str(DOCTYPE)?;
    out.write_str("<html><head><title>404 Not Found</title></head><body>\r\n")?;
    out.write_str("<h1>Not Found</h1>\r\n")?;
    write!(
        out,
        "<p>The requested URL {} was not found on this server.</p>\r\n",
        Escaped(path)
    )?;
    write!(
        out,
        "<hr><address>Sous vide web server at {}</address>\r\n",
        DottedQuad(server_ip)
    )?;
    out.write_str("</body></html>")
}

/// 401 body
pub fn unauthorized<W: Write>(out: &mut W) -> fmt::Result {
    out.write_str(DOCTYPE)?;
    out.write_str("<h1>401 Unauthorized</h1>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    fn settings(dhcp: bool) -> IpSettings {
        IpSettings {
            dhcp,
            ip: [192, 168, 1, 200],
            netmask: [255, 255, 255, 0],
            gateway: [192, 168, 1, 1],
            dns: [8, 8, 4, 4],
        }
    }

    #[test]
    fn test_home_links_use_host() {
        let mut out = String::<512>::new();
        home(&mut out, "10.0.0.9").unwrap();
        assert!(out.contains("href=\"http://10.0.0.9/ipconfig\""));
        assert!(out.contains("href=\"http://10.0.0.9/temp\""));
    }

    #[test]
    fn test_home_without_host() {
        let mut out = String::<512>::new();
        home(&mut out, "").unwrap();
        assert!(out.contains("href=\"http:///temp\""));
    }

    #[test]
    fn test_temperature_lines() {
        let mut out = String::<128>::new();
        temperatures(&mut out, [("t0", "61.5"), ("t1", "60.9")]).unwrap();
        assert_eq!(out.as_str(), "t0=61.5 <br>t1=60.9 <br>");
    }

    #[test]
    fn test_no_channels_empty_body() {
        let mut out = String::<16>::new();
        temperatures(&mut out, core::iter::empty::<(&str, &str)>()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_form_prefilled() {
        let mut out = String::<1024>::new();
        ipconfig_form(&mut out, "box", &settings(false)).unwrap();
        assert!(out.contains("name=\"ip\" value=\"192.168.1.200\""));
        assert!(out.contains("name=\"subnet\" value=\"255.255.255.0\""));
        assert!(out.contains("name=\"gw\" value=\"192.168.1.1\""));
        assert!(out.contains("name=\"dns\" value=\"8.8.4.4\""));
        assert!(!out.contains("checked"));
    }

    #[test]
    fn test_form_dhcp_checked() {
        let mut out = String::<1024>::new();
        ipconfig_form(&mut out, "box", &settings(true)).unwrap();
        assert!(out.contains("value=\"1\" checked>"));
    }

    #[test]
    fn test_not_found_echoes_path_escaped() {
        let mut out = String::<512>::new();
        not_found(&mut out, "/<script>", [192, 168, 1, 200]).unwrap();
        assert!(out.contains("/&lt;script&gt;"));
        assert!(out.contains("192.168.1.200"));
    }

    #[test]
    fn test_overflow_reported() {
        let mut out = String::<32>::new();
        assert!(home(&mut out, "host").is_err());
    }
}
