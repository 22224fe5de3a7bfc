pub mod command;
pub mod forwarder;
pub mod notes;
pub mod status;
pub mod stdin_handler;
pub mod transpose;
