//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Workouts live under `users/{user_id}/workouts`
    pub const WORKOUTS: &str = "workouts";
    /// Sets live under `users/{user_id}/workouts/{workout_id}/sets`
    pub const SETS: &str = "sets";
    /// Reps live under `.../sets/{set_id}/reps`
    pub const REPS: &str = "reps";
}
