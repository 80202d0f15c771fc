pub mod night_hours;
pub mod reading;
pub mod series;
pub mod transfer;
