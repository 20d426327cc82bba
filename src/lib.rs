// SPDX-License-Identifier: MIT

//! Workout-Export: pull workout data out of Firestore.
//!
//! Fetches the nested workout → sets → reps document hierarchy for a
//! user, and can export the result as JSON or render a per-set signal
//! chart.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
