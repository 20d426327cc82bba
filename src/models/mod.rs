// SPDX-License-Identifier: MIT

//! Data models.

pub mod workout;

pub use workout::{RawDoc, Rep, Workout, WorkoutSet};
