use thiserror::Error;

/// Failures talking to the beacon node over HTTP.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("Request failed with status code: {status_code}")]
    RequestFailed { status_code: reqwest::StatusCode },

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Why a single attestation duty was abandoned.
///
/// None of these are fatal to the process: the duty for the slot is lost and the validator
/// attests again at its next assigned slot.
#[derive(Debug, Error)]
pub enum DutyError {
    #[error("Could not fetch validator index: {0:#}")]
    IndexResolutionFailed(#[source] anyhow::Error),

    #[error("Could not request attestation to sign at slot {slot}: {cause:#}")]
    DataFetchFailed {
        slot: u64,
        #[source]
        cause: anyhow::Error,
    },

    #[error("Validator index {validator_index} not found in committee")]
    NotInCommittee { validator_index: u64 },

    #[error("Could not build attestation: committee is empty")]
    EmptyCommittee,

    #[error("Could not build attestation: {0:#}")]
    BuildFailed(#[source] anyhow::Error),

    #[error("Could not submit attestation to beacon node: {0:#}")]
    SubmissionFailed(#[source] anyhow::Error),

    #[error("Attestation duty cancelled by shutdown")]
    ShutdownRequested,
}
