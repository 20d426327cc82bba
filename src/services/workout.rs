// SPDX-License-Identifier: MIT

//! Hierarchical workout fetcher.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Rep, Workout, WorkoutSet};

/// Assembles the nested workout structure from the document hierarchy.
pub struct WorkoutService {
    db: FirestoreDb,
}

impl WorkoutService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Fetch a workout with all of its sets and reps.
    ///
    /// Returns `Ok(None)` when the workout document does not exist; this is
    /// not an error. Fetch failures partway through the traversal propagate
    /// and discard everything accumulated for this call.
    ///
    /// Cost is one read per document traversed (1 + 1 + S + ΣR), strictly
    /// sequential. Sets and reps come back in the database's default stream
    /// order (document-name order); no sort key is applied.
    pub async fn fetch(&self, user_id: &str, workout_id: &str) -> Result<Option<Workout>> {
        if user_id.is_empty() {
            return Err(AppError::InvalidArgument(
                "user id must not be empty".to_string(),
            ));
        }
        if workout_id.is_empty() {
            return Err(AppError::InvalidArgument(
                "workout id must not be empty".to_string(),
            ));
        }

        tracing::debug!(user_id, workout_id, "Retrieving workout data");

        let Some(workout_doc) = self.db.get_workout_doc(user_id, workout_id).await? else {
            tracing::error!(workout_id, "Workout not found");
            return Ok(None);
        };

        let mut sets = Vec::new();
        for set_doc in self.db.list_set_docs(user_id, workout_id).await? {
            let reps: Vec<Rep> = self
                .db
                .list_rep_docs(user_id, workout_id, &set_doc.doc_id)
                .await?
                .into_iter()
                .map(Rep::from_doc)
                .collect();

            sets.push(WorkoutSet::from_doc(set_doc, reps));
        }

        let workout = Workout::from_doc(workout_doc, sets);
        tracing::debug!(
            workout_id = %workout.id,
            set_count = workout.sets.len(),
            "Workout assembled"
        );

        Ok(Some(workout))
    }
}
