/// Ports module defining interfaces for hexagonal architecture
///
/// The application core only talks to the outside world (plugin directory,
/// remote APIs, the key-value store, the console) through these traits.
pub mod outbound;
