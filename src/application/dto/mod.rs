/// Data Transfer Objects for application layer
///
/// DTOs carry requests and results between the CLI adapter and the use
/// cases, keeping the domain layer isolated.
mod action_outcome;
mod output_format;
mod scan_request;

pub use action_outcome::ActionOutcome;
pub use output_format::OutputFormat;
pub use scan_request::ScanRequest;
