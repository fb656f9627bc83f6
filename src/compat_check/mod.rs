/// Compatibility checking core: domain model and pure services
///
/// Nothing in this module performs I/O. Remote data arrives already
/// normalized through the outbound ports.
pub mod domain;
pub mod services;
