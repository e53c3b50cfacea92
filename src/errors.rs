use std::{error, fmt, io};

use crate::codec::Field;

/// A frame field could not be written to the output buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EncodingError {
    /// The first field that did not fit.
    pub field: Field,
    /// Bytes the field needs.
    pub needed: usize,
    /// Bytes that were left in the buffer when the field was written.
    pub available: usize,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "cannot encode {}: needs {} bytes, {} left in buffer",
               self.field,
               self.needed,
               self.available)
    }
}

impl error::Error for EncodingError {}

/// The input ended before a frame field could be read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodingError {
    /// The first field that could not be read.
    pub field: Field,
    /// Bytes the field needs.
    pub needed: usize,
    /// Bytes that were left in the input when the field was read.
    pub available: usize,
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "cannot decode {}: needs {} bytes, {} left in input",
               self.field,
               self.needed,
               self.available)
    }
}

impl error::Error for DecodingError {}

/// Error constructing a `Frame` from an id and a payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    /// CAN ID was outside the range of valid IDs
    IdTooLarge,
    /// More than 8 bytes of payload data were passed in
    TooMuchData,
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConstructionError::IdTooLarge => write!(f, "CAN ID too large"),
            ConstructionError::TooMuchData => write!(f, "payload is larger than CAN maximum of 8 bytes"),
        }
    }
}

impl error::Error for ConstructionError {}

/// Errors returned by frame channel and filter operations.
#[derive(Debug)]
pub enum Error {
    /// The underlying transport failed. Passed through unchanged.
    Io(io::Error),

    /// A frame could not be encoded.
    Encoding(EncodingError),

    /// The bytes read could not be decoded into a frame.
    Decoding(DecodingError),

    /// The channel has no kernel socket, so filters cannot be installed.
    FilterUnsupported,

    /// More filters were requested than the kernel accepts.
    TooManyFilters { requested: usize, max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Io(ref e) => write!(f, "i/o error: {}", e),
            Error::Encoding(ref e) => write!(f, "encoding error: {}", e),
            Error::Decoding(ref e) => write!(f, "decoding error: {}", e),
            Error::FilterUnsupported => write!(f, "not possible to set kernel filter"),
            Error::TooManyFilters { requested, max } => {
                write!(f, "too many kernel filters ({} requested, limit {})", requested, max)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            Error::Encoding(ref e) => Some(e),
            Error::Decoding(ref e) => Some(e),
            Error::FilterUnsupported | Error::TooManyFilters { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<EncodingError> for Error {
    fn from(e: EncodingError) -> Error {
        Error::Encoding(e)
    }
}

impl From<DecodingError> for Error {
    fn from(e: DecodingError) -> Error {
        Error::Decoding(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
