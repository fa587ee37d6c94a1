pub mod buildings;
pub mod config;
pub mod route;
