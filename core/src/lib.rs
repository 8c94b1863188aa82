pub mod cidr_scan;
pub mod invoke;
pub mod phases;
pub mod pipeline;
pub mod pool;
pub mod port_scan;
pub mod result;
pub mod runner;
pub mod store;
pub mod ticker;
