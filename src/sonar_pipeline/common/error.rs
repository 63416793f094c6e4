use thiserror::Error;

#[derive(Error, Debug)]
pub enum SonarError {
    #[error("Failed to read input file: {0}")]
    InputRead(String),

    #[error("Failed to write output file: {0}")]
    OutputWrite(String),

    #[error("No sonar data: {0}")]
    Empty(String),

    #[error("Invalid XTF format: {0}")]
    Format(String),

    #[error("Invalid sonar data: {0}")]
    Data(String),

    #[error("Failed to encode TIFF image: {0}")]
    Encode(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification a presentation layer can map to a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be read or produced nothing usable.
    NoData,
    /// The input is not a recognised capture.
    BadFormat,
    /// A processing stage rejected its input or failed to encode output.
    Processing,
}

impl SonarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SonarError::InputRead(_) | SonarError::Io(_) | SonarError::Empty(_) => ErrorKind::NoData,
            SonarError::Format(_) => ErrorKind::BadFormat,
            SonarError::Data(_)
            | SonarError::InvalidDimensions(_, _)
            | SonarError::Encode(_)
            | SonarError::OutputWrite(_) => ErrorKind::Processing,
        }
    }
}

pub type Result<T> = std::result::Result<T, SonarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let io = SonarError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.kind(), ErrorKind::NoData);
        assert_eq!(SonarError::Empty("no pings".into()).kind(), ErrorKind::NoData);
        assert_eq!(SonarError::Format("tag".into()).kind(), ErrorKind::BadFormat);
        assert_eq!(SonarError::Data("empty".into()).kind(), ErrorKind::Processing);
        assert_eq!(SonarError::InvalidDimensions(0, 3).kind(), ErrorKind::Processing);
    }

    #[test]
    fn test_error_display() {
        let err = SonarError::Format("file format tag 0x7a".into());
        assert_eq!(err.to_string(), "Invalid XTF format: file format tag 0x7a");
    }
}
