//! Tag-boundary extraction of XML report sections from raw engine output.
//!
//! The engine writes a mixed stream: log lines interleaved with one or more
//! embedded XML documents. The stream as a whole is not well-formed XML, so
//! the only reliable way to isolate a section is to slice between its tag
//! boundaries. This module is deliberately that permissive slicer; swapping
//! it for a streaming XML scanner would not touch any caller.

use crate::error::{Result, ValidationError};

/// Element name of the machine-readable validation report section.
pub const VALIDATION_REPORT_TAG: &str = "validationReport";

/// Element name of the engine's run summary section.
pub const SUMMARY_TAG: &str = "summary";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Extract the named XML section from raw engine output.
///
/// Slices from the first occurrence of `<tag` through the first subsequent
/// `</tag>` inclusive and prefixes a standard XML declaration, yielding a
/// standalone well-formed fragment. Fails with
/// [`ValidationError::MalformedOutput`] when either boundary is absent,
/// which is the normal outcome for empty or garbage output.
pub fn extract(raw: &str, tag: &str) -> Result<String> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let start = raw.find(&open).ok_or_else(|| ValidationError::MalformedOutput {
        tag: tag.to_string(),
    })?;
    let end = raw[start..]
        .find(&close)
        .map(|offset| start + offset + close.len())
        .ok_or_else(|| ValidationError::MalformedOutput {
            tag: tag.to_string(),
        })?;

    Ok(format!("{XML_DECLARATION}{}", &raw[start..end]))
}
