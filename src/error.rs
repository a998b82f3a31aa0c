//! Process-level error type.
//!
//! Component errors (`ValidationError`, `SubmitError`, `BackendError`) stay
//! inside the page and end up as toasts. Only failures that stop the program
//! (bad configuration, terminal I/O) become an `AppError` and reach `main`.

/// Exit code for configuration and usage problems.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for runtime failures (terminal, log file, I/O).
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(EXIT_CONFIG, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(EXIT_RUNTIME, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_exit_codes() {
        assert_eq!(AppError::config("x").exit_code(), EXIT_CONFIG);
        assert_eq!(AppError::runtime("x").exit_code(), EXIT_RUNTIME);
        assert_eq!(AppError::new(7, "boom").to_string(), "boom");
    }
}
