//! Types produced by the request reader and consumed by the policy layer.

/// Command text pulled out of a hook payload.
///
/// Either a specific field value found in a JSON payload, or the whole raw
/// payload when no such field could be located. Both variants are scanned
/// the same way by the policy matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// Non-empty string from a conventional command field.
    Parsed(String),
    /// The entire payload, used as-is.
    Unparsed(String),
}

impl Extracted {
    /// The text the matcher should scan.
    pub fn text(&self) -> &str {
        match self {
            Extracted::Parsed(s) | Extracted::Unparsed(s) => s,
        }
    }

    /// Short label for logs: which extraction path produced this text.
    pub fn source(&self) -> &'static str {
        match self {
            Extracted::Parsed(_) => "parsed",
            Extracted::Unparsed(_) => "raw",
        }
    }
}

/// One hook invocation's payload and the command text extracted from it.
#[derive(Debug, Clone)]
pub struct ToolInvocationRequest {
    pub raw_payload: String,
    pub command: Extracted,
}
