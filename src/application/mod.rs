/// Application layer - Use cases, DTOs and read models
///
/// This layer orchestrates the compatibility services and reaches the
/// outside world only through the outbound ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod use_cases;
