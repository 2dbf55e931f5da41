pub mod map_frame;
pub mod metadata;
pub mod metrics;
pub mod timeseries;
