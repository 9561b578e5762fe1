/// Errors that can cross the crate boundary.
///
/// Only structural failures of the input document are reported as errors.
/// Malformed geometric data (bad numbers, missing radii, degenerate arcs)
/// degrades to a geometric default instead, see the crate docs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error when parsing XML: {0}")]
    Xml(#[from] quick_xml::Error),
}
