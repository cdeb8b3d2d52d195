#[cfg_attr(test, derive(Debug))]
#[derive(Clone, PartialEq)]
pub enum Error {
    /// Bad user input, rejected before any request is sent.
    Validation { message: String },
    /// The backend answered with an error payload or a non-2xx status.
    Api {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },
    /// The request never completed (connection refused, timeout, ...).
    Transport { endpoint: String, message: String },
    /// A 2xx response that does not match the documented shape.
    Decode { endpoint: String, message: String },
    /// Local I/O while writing an export artifact or terminal output.
    Io { message: String },
}

impl Error {
    pub fn new_validation_error<T, U: Into<String>>(message: U) -> std::result::Result<T, Self> {
        Err(Self::Validation { message: message.into() })
    }

    pub fn new_api_error<T, U: Into<String>>(
        endpoint: &str,
        status: Option<u16>,
        message: U,
    ) -> std::result::Result<T, Self> {
        Err(Self::Api {
            endpoint: endpoint.to_owned(),
            status,
            message: message.into(),
        })
    }

    pub fn new_transport_error<T>(err: reqwest::Error, endpoint: &str) -> std::result::Result<T, Self> {
        let message = if err.is_timeout() {
            format!("The request timed out: {err}")
        } else if err.is_connect() {
            format!("Failed to connect to the server: {err}")
        } else {
            format!("{err}")
        };
        Err(Self::Transport {
            endpoint: endpoint.to_owned(),
            message,
        })
    }

    pub fn new_decode_error<T>(err: serde_json::Error, endpoint: &str) -> std::result::Result<T, Self> {
        Err(Self::Decode {
            endpoint: endpoint.to_owned(),
            message: format!("{err}"),
        })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "{}", message),
            Self::Api {
                endpoint,
                status,
                message,
            } => {
                write!(f, "{}\nEndpoint: {}", message, endpoint)?;
                if let Some(status) = status {
                    write!(f, "\nStatus: {}", status)?;
                }
                Ok(())
            }
            Self::Transport { endpoint, message } => {
                write!(f, "{}\nEndpoint: {}", message, endpoint)
            }
            Self::Decode { endpoint, message } => {
                write!(f, "Unexpected response from the server: {}\nEndpoint: {}", message, endpoint)
            }
            Self::Io { message } => write!(f, "{}", message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io {
            message: format!("{value}"),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::Io {
            message: format!("{value}"),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Io {
            message: format!("{value}"),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Io {
            message: format!("{value}"),
        }
    }
}
