//! Status lines and the fixed-capacity response buffer

use core::fmt;

use heapless::String;

/// Response status, each with its complete header block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Ok,
    Unauthorized,
    NotFound,
}

impl Status {
    /// Status line and headers up to and including the blank line
    pub const fn header(self) -> &'static str {
        match self {
            Status::Ok => {
                "HTTP/1.0 200 OK\r\nContent-Type: text/html\r\nPragma: no-cache\r\n\r\n"
            }
            Status::Unauthorized => {
                "HTTP/1.0 401 Unauthorized\r\nContent-Type: text/html\r\n\r\n"
            }
            Status::NotFound => {
                "HTTP/1.0 404 Not Found\r\nContent-Type: text/html\r\nPragma: no-cache\r\n\r\n"
            }
        }
    }

    /// Numeric status code
    pub const fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Unauthorized => 401,
            Status::NotFound => 404,
        }
    }
}

/// Rendering errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Page did not fit the response buffer
    Overflow,
}

impl From<fmt::Error> for RenderError {
    fn from(_: fmt::Error) -> Self {
        RenderError::Overflow
    }
}

/// A response being assembled in a fixed buffer
///
/// Created with the header block already written; pages append the body
/// through [`fmt::Write`].
pub struct Response<const N: usize> {
    status: Status,
    text: String<N>,
}

impl<const N: usize> Response<N> {
    /// Start a response with `status`
    pub fn new(status: Status) -> Result<Self, RenderError> {
        let mut text = String::new();
        text.push_str(status.header())
            .map_err(|_| RenderError::Overflow)?;
        Ok(Self { status, text })
    }

    /// Status the response was started with
    pub fn status(&self) -> Status {
        self.status
    }

    /// Full response text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Full response bytes, ready to hand to the transport
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Body, i.e. everything after the header block
    pub fn body(&self) -> &str {
        self.text
            .as_str()
            .get(self.status.header().len()..)
            .unwrap_or("")
    }
}

impl<const N: usize> fmt::Write for Response<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_headers_end_with_blank_line() {
        for status in [Status::Ok, Status::Unauthorized, Status::NotFound] {
            assert!(status.header().ends_with("\r\n\r\n"));
            assert!(status.header().starts_with("HTTP/1.0 "));
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::Unauthorized.code(), 401);
        assert_eq!(Status::NotFound.code(), 404);
    }

    #[test]
    fn test_body_after_header() {
        let mut resp = Response::<256>::new(Status::Ok).unwrap();
        assert_eq!(resp.body(), "");
        write!(resp, "hello {}", 42).unwrap();
        assert_eq!(resp.body(), "hello 42");
        assert!(resp.as_str().starts_with("HTTP/1.0 200 OK\r\n"));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            Response::<16>::new(Status::Ok).err(),
            Some(RenderError::Overflow)
        );

        let mut resp = Response::<96>::new(Status::Unauthorized).unwrap();
        let long = [b'x'; 64];
        let long = core::str::from_utf8(&long).unwrap();
        assert!(resp.write_str(long).is_err());
    }
}
