pub mod config;
pub mod container;
pub mod controller;
