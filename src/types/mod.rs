pub mod calendar;
pub mod pollutant;
pub mod resource;
