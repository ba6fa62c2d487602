//! Adapters implementing application ports

mod digitransit_adapter;

pub use digitransit_adapter::DigitransitAdapter;
