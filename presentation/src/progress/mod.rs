//! Progress reporting for session actions

pub mod spinner;
