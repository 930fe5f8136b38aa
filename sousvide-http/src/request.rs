//! Lax HTTP request tokenizer
//!
//! Splits a received payload into request line, headers and body without
//! copying. Only what the controller's pages need is recognized: the
//! method, the path, header lines and whatever follows the blank line.

use heapless::Vec;

/// Maximum number of header lines kept; further headers are ignored
pub const MAX_HEADERS: usize = 16;

/// Longest `Host` value used for building links
pub const MAX_HOST_LEN: usize = 50;

/// Request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    Get,
    Post,
    /// Any other verb; never routed
    Other,
}

impl Method {
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Other,
        }
    }
}

/// Errors that can occur while tokenizing a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Payload is empty
    Empty,
    /// Request line lacks a method or a path
    MalformedRequestLine,
}

/// A single `name: value` header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// A tokenized request borrowing from the receive buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    /// Request method
    pub method: Method,
    /// Request target exactly as sent (`/`, `/temp`, ...)
    pub path: &'a str,
    /// Header lines in arrival order, the first [`MAX_HEADERS`] only
    pub headers: Vec<Header<'a>, MAX_HEADERS>,
    /// First `Host` value, found even past the header table's capacity
    host: Option<&'a str>,
    /// Everything after the blank line
    pub body: &'a str,
}

impl<'a> Request<'a> {
    /// Tokenize a raw payload
    ///
    /// Bytes after the first invalid UTF-8 sequence are dropped; the pages
    /// only ever deal in ASCII.
    pub fn parse(payload: &'a [u8]) -> Result<Self, ParseError> {
        let text = match core::str::from_utf8(payload) {
            Ok(text) => text,
            Err(e) => {
                // valid_up_to is always a char boundary
                core::str::from_utf8(&payload[..e.valid_up_to()]).unwrap_or("")
            }
        };

        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let (head, body) = match text.find("\r\n\r\n") {
            Some(pos) => (&text[..pos], &text[pos + 4..]),
            None => (text, ""),
        };

        let mut lines = head.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

        let request_line = lines.next().ok_or(ParseError::MalformedRequestLine)?;
        let mut tokens = request_line.split(' ').filter(|t| !t.is_empty());
        let method = tokens
            .next()
            .map(Method::from_token)
            .ok_or(ParseError::MalformedRequestLine)?;
        let path = tokens.next().ok_or(ParseError::MalformedRequestLine)?;

        let mut headers = Vec::new();
        let mut host = None;
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                let header = Header {
                    name: name.trim(),
                    value: value.trim(),
                };
                if host.is_none() && header.name.eq_ignore_ascii_case("Host") {
                    host = Some(header.value);
                }
                // Further headers are dropped once the table is full
                let _ = headers.push(header);
            }
        }

        Ok(Self {
            method,
            path,
            headers,
            host,
            body,
        })
    }

    /// Value of the first header called `name` (ASCII case-insensitive)
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value)
    }

    /// Host the client used to reach us, truncated to [`MAX_HOST_LEN`]
    ///
    /// Returns an empty string when the request carries no `Host` header,
    /// which renders as empty links.
    pub fn host(&self) -> &'a str {
        truncate(self.host.unwrap_or(""), MAX_HOST_LEN)
    }
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
