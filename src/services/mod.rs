// Services module - cross-cutting infrastructure services

pub mod encryption;

pub use encryption::EncryptionService;
