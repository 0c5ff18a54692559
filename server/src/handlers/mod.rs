pub mod service_handler;
pub mod status_handlers;
