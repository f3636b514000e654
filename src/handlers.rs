pub mod extractors;
pub mod user_dtos;
pub mod user_handlers;
