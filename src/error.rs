use std::fmt;

#[derive(Debug)]
pub enum PricingError {
    Request(String),
    Status { status: u16, body: String },
    NonJsonResponse(String),
    Parse(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PricingError::Request(msg) => write!(f, "Request error: {}", msg),
            PricingError::Status { status, body } => {
                write!(f, "Pricing server returned {}: {}", status, body)
            }
            PricingError::NonJsonResponse(preview) => write!(f, "Non-JSON response: {}", preview),
            PricingError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

impl From<reqwest::Error> for PricingError {
    fn from(err: reqwest::Error) -> Self {
        PricingError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::Parse(err.to_string())
    }
}
