//! Chain handlers: logging, transcript persistence, and the intake wizard.

pub mod intake_handler;
pub mod logging_handler;
pub mod transcript_handler;

pub use intake_handler::IntakeHandler;
pub use logging_handler::LoggingHandler;
pub use transcript_handler::TranscriptHandler;
