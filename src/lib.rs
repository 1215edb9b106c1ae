pub mod action;
pub mod adapters;
pub mod params;
pub mod request;
