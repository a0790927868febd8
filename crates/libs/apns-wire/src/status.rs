use core::fmt;

/// Status codes the gateway reports in its error-response frame.
///
/// The mapping is closed over the codes the legacy protocol documents;
/// anything else lands in [`ErrorStatus::Unknown`] rather than failing the
/// decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorStatus {
    NoErrors,
    ProcessingError,
    MissingDeviceToken,
    MissingTopic,
    MissingPayload,
    InvalidTokenSize,
    InvalidTopicSize,
    InvalidPayloadSize,
    InvalidToken,
    Shutdown,
    Unknown(u8),
}

impl ErrorStatus {
    pub fn as_u8(self) -> u8 {
        match self {
            ErrorStatus::NoErrors => 0,
            ErrorStatus::ProcessingError => 1,
            ErrorStatus::MissingDeviceToken => 2,
            ErrorStatus::MissingTopic => 3,
            ErrorStatus::MissingPayload => 4,
            ErrorStatus::InvalidTokenSize => 5,
            ErrorStatus::InvalidTopicSize => 6,
            ErrorStatus::InvalidPayloadSize => 7,
            ErrorStatus::InvalidToken => 8,
            ErrorStatus::Shutdown => 10,
            ErrorStatus::Unknown(code) => code,
        }
    }
}

impl From<u8> for ErrorStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => ErrorStatus::NoErrors,
            1 => ErrorStatus::ProcessingError,
            2 => ErrorStatus::MissingDeviceToken,
            3 => ErrorStatus::MissingTopic,
            4 => ErrorStatus::MissingPayload,
            5 => ErrorStatus::InvalidTokenSize,
            6 => ErrorStatus::InvalidTopicSize,
            7 => ErrorStatus::InvalidPayloadSize,
            8 => ErrorStatus::InvalidToken,
            10 => ErrorStatus::Shutdown,
            other => ErrorStatus::Unknown(other),
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorStatus::NoErrors => write!(f, "no errors encountered"),
            ErrorStatus::ProcessingError => write!(f, "processing error"),
            ErrorStatus::MissingDeviceToken => write!(f, "missing device token"),
            ErrorStatus::MissingTopic => write!(f, "missing topic"),
            ErrorStatus::MissingPayload => write!(f, "missing payload"),
            ErrorStatus::InvalidTokenSize => write!(f, "invalid token size"),
            ErrorStatus::InvalidTopicSize => write!(f, "invalid topic size"),
            ErrorStatus::InvalidPayloadSize => write!(f, "invalid payload size"),
            ErrorStatus::InvalidToken => write!(f, "invalid token"),
            ErrorStatus::Shutdown => write!(f, "gateway shutdown"),
            ErrorStatus::Unknown(code) => write!(f, "unknown status code {code}"),
        }
    }
}
