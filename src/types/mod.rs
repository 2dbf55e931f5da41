pub mod data_source;
pub mod parameter;
pub mod station;
pub mod time_period;
