use thiserror::Error;

/// Everything that can go wrong while toggling the charging mode.
///
/// Messages read as the continuation of "Failed ...".
#[derive(Error, Debug)]
pub enum Error {
    #[error("to initialise libusb: error {}: {0}", code(.0))]
    Init(rusb::Error),
    #[error("to enumerate USB devices: error {}: {0}", code(.0))]
    Enumerate(rusb::Error),
    #[error("to get device descriptor: error {}: {0}", code(.0))]
    Descriptor(rusb::Error),
    #[error("to open device: error {}: {0}", code(.0))]
    Open(rusb::Error),
    #[error("to claim interface: error {}: {0}", code(.0))]
    Claim(rusb::Error),
    #[error("to send command: error {}: {0}", code(.0))]
    Transfer(rusb::Error),
    #[error("to find a matching device, or every attempt failed.")]
    NoDevice,
}

impl Error {
    /// Process exit status for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Init(_) => 1,
            Error::Enumerate(_) => 2,
            _ => 3,
        }
    }
}

/// Maps a `rusb::Error` back onto libusb's numeric error code.
pub fn code(err: &rusb::Error) -> i32 {
    match err {
        rusb::Error::Io => -1,
        rusb::Error::InvalidParam => -2,
        rusb::Error::Access => -3,
        rusb::Error::NoDevice => -4,
        rusb::Error::NotFound => -5,
        rusb::Error::Busy => -6,
        rusb::Error::Timeout => -7,
        rusb::Error::Overflow => -8,
        rusb::Error::Pipe => -9,
        rusb::Error::Interrupted => -10,
        rusb::Error::NoMem => -11,
        rusb::Error::NotSupported => -12,
        _ => -99,
    }
}
