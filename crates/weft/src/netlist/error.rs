use thiserror::Error;

/// Recoverable netlist construction failures. Contract violations (bad port
/// numbers, nil dereference, out-of-range vector indices) are programming
/// errors and panic instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NetlistError {
    #[error("port {port} of net{net} is already the destination of a link")]
    PortInUse { net: u32, port: usize },
    #[error("label already defined: {0}")]
    DuplicateLabel(String),
}
