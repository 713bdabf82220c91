use error_stack::{AttachmentKind, FrameKind, Report};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type EstimatorResult<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Error {
    #[error("Reqwest error")]
    ReqwestError,

    #[error("Response error")]
    ResponseError,

    #[error("Models error")]
    ModelsError,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Swap SDK error: {0}")]
    SdkError(SdkFailure),

    #[error("Gas computation error: {0}")]
    GasComputation(String),

    #[error("{0}")]
    GasPrice(GasPriceError),
}

/// Failure reported by the swap SDK. `code` is set when the SDK exposes a typed error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkFailure {
    pub code: Option<String>,
    pub message: String,
}

impl SdkFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for SdkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GasPriceError {
    #[error("Insufficient funds for gas: {0}")]
    InsufficientFunds(String),

    #[error("Gas limit too low: {0}")]
    LowGas(String),

    #[error("Max gas overflow: {0}")]
    MaxGasOverflow(String),

    #[error("Gas price error: {0}")]
    Generic(String),
}

const INSUFFICIENT_FUNDS_CODES: [&str; 1] = ["INSUFFICIENT_FUNDS"];
const LOW_GAS_CODES: [&str; 2] = ["UNPREDICTABLE_GAS_LIMIT", "GAS_LIMIT_TOO_LOW"];
const MAX_GAS_OVERFLOW_CODES: [&str; 2] = ["MAX_GAS_OVERFLOW", "NUMERIC_FAULT"];

const INSUFFICIENT_FUNDS_PATTERNS: [&str; 2] = ["insufficient funds", "insufficient balance"];
const LOW_GAS_PATTERNS: [&str; 4] = ["gas too low", "intrinsic gas", "low gas", "out of gas"];
const MAX_GAS_OVERFLOW_PATTERNS: [&str; 4] = [
    "max fee",
    "exceeds block gas limit",
    "gas limit reached",
    "overflow",
];

/// Classifies an upstream failure. Typed codes win; message substrings are the last tier.
pub fn classify_gas_error(code: Option<&str>, message: &str) -> GasPriceError {
    let message_owned = message.to_string();

    if let Some(code) = code.map(|c| c.trim().to_uppercase()) {
        if INSUFFICIENT_FUNDS_CODES.contains(&code.as_str()) {
            return GasPriceError::InsufficientFunds(message_owned);
        }
        if LOW_GAS_CODES.contains(&code.as_str()) {
            return GasPriceError::LowGas(message_owned);
        }
        if MAX_GAS_OVERFLOW_CODES.contains(&code.as_str()) {
            return GasPriceError::MaxGasOverflow(message_owned);
        }
    }

    let lowered = message.to_lowercase();
    let matches_any = |patterns: &[&str]| patterns.iter().any(|p| lowered.contains(p));

    if matches_any(&INSUFFICIENT_FUNDS_PATTERNS) {
        GasPriceError::InsufficientFunds(message_owned)
    } else if matches_any(&LOW_GAS_PATTERNS) {
        GasPriceError::LowGas(message_owned)
    } else if matches_any(&MAX_GAS_OVERFLOW_PATTERNS) {
        GasPriceError::MaxGasOverflow(message_owned)
    } else {
        GasPriceError::Generic(message_owned)
    }
}

impl GasPriceError {
    /// Classifies the context of a report, folding its printable attachments into the message.
    pub fn from_report(report: &Report<Error>) -> Self {
        let context = report.current_context();
        let attachments = report.format();
        let message = if attachments.is_empty() {
            context.to_string()
        } else {
            format!("{context}: {attachments}")
        };

        match context {
            Error::GasPrice(already_classified) => already_classified.clone(),
            Error::SdkError(failure) => classify_gas_error(failure.code.as_deref(), &message),
            _ => classify_gas_error(None, &message),
        }
    }
}

pub trait ReportDisplayExt {
    fn format(&self) -> String;
}

impl ReportDisplayExt for Report<Error> {
    fn format(&self) -> String {
        let mut output = String::new();

        let frames = self.current_frames();

        for frame in frames.iter() {
            if let FrameKind::Attachment(AttachmentKind::Printable(attachment)) = frame.kind() {
                output.push_str(&format!(" {attachment} "));
            }
        }

        output.trim().to_string()
    }
}
