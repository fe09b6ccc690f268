//! Cart records served by the in-process store, with amount validation.

pub mod entity;
