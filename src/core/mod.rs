pub mod api;
pub mod command;
pub mod components;
pub mod desk;
pub mod links;
pub mod logging;
pub mod request;
pub mod route;
