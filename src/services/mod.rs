// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod chart;
pub mod export;
pub mod workout;

pub use workout::WorkoutService;
