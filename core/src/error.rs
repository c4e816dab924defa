use thiserror::Error;

#[derive(Debug, Error)]
pub enum CricomError {
    #[error("No Morse code for symbol '{0}'")]
    UnknownSymbol(String),

    #[error("Malformed slot sequence at position {position}")]
    MalformedSequence { position: usize },

    #[error("No beep found in the input signal")]
    NoSignalFound,

    #[error("Input signal is silent (peak amplitude is zero)")]
    SilentInput,

    #[error("Decoding produced an empty message")]
    EmptyResult,

    #[error("Slot of {samples} samples is shorter than the minimum of {min}")]
    SlotTooShort { samples: usize, min: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Audio I/O error: {0}")]
    AudioIo(String),
}

pub type Result<T> = std::result::Result<T, CricomError>;
