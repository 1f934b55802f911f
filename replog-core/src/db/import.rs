//! Bulk import of historical sessions.
//!
//! The payload references parents by array position; ids are resolved
//! while the transaction runs. Every index is validated up front, so a bad
//! payload is rejected before any row is written, and an insert failure
//! mid-way rolls the whole call back.

use anyhow::Result;
use log::info;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::models::{ImportCounts, ImportData};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("set {set}: workout index {index} out of range ({len} workouts in payload)")]
    WorkoutIndexOutOfRange { set: usize, index: usize, len: usize },
    #[error("set {set}: exercise index {index} out of range ({len} exercises in payload)")]
    ExerciseIndexOutOfRange { set: usize, index: usize, len: usize },
}

fn validate(data: &ImportData) -> Result<(), ImportError> {
    for (i, set) in data.sets.iter().enumerate() {
        if set.workout_index >= data.workouts.len() {
            return Err(ImportError::WorkoutIndexOutOfRange {
                set: i,
                index: set.workout_index,
                len: data.workouts.len(),
            });
        }
        if set.exercise_index >= data.exercises.len() {
            return Err(ImportError::ExerciseIndexOutOfRange {
                set: i,
                index: set.exercise_index,
                len: data.exercises.len(),
            });
        }
    }
    Ok(())
}

/// All-or-nothing import. Exercises are de-duplicated against existing
/// (name, category) rows; the returned counts cover rows actually created,
/// so a payload exercise that matched an existing row is not recounted.
pub async fn bulk_import(pool: &SqlitePool, data: &ImportData) -> Result<ImportCounts> {
    validate(data)?;

    let mut tx = pool.begin().await?;
    let mut counts = ImportCounts::default();

    let mut workout_ids = Vec::with_capacity(data.workouts.len());
    for workout in &data.workouts {
        let result = sqlx::query("INSERT INTO workouts (date, notes) VALUES (?1, ?2)")
            .bind(&workout.date)
            .bind(workout.notes.as_deref())
            .execute(&mut *tx)
            .await?;
        workout_ids.push(result.last_insert_rowid());
        counts.workouts += 1;
    }

    let mut exercise_ids = Vec::with_capacity(data.exercises.len());
    for exercise in &data.exercises {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM exercises WHERE name = ?1 AND category = ?2")
                .bind(&exercise.name)
                .bind(&exercise.category)
                .fetch_optional(&mut *tx)
                .await?;

        let id = match existing {
            Some(id) => id,
            None => {
                let result =
                    sqlx::query("INSERT INTO exercises (name, category) VALUES (?1, ?2)")
                        .bind(&exercise.name)
                        .bind(&exercise.category)
                        .execute(&mut *tx)
                        .await?;
                counts.exercises += 1;
                result.last_insert_rowid()
            }
        };
        exercise_ids.push(id);
    }

    for set in &data.sets {
        sqlx::query(
            "INSERT INTO sets (workout_id, exercise_id, weight, reps, load_type, set_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(workout_ids[set.workout_index])
        .bind(exercise_ids[set.exercise_index])
        .bind(set.weight)
        .bind(set.reps)
        .bind(set.load_type)
        .bind(set.set_order)
        .execute(&mut *tx)
        .await?;
        counts.sets += 1;
    }

    tx.commit().await?;
    info!(
        "Imported {} workouts, {} exercises, {} sets",
        counts.workouts, counts.exercises, counts.sets
    );
    Ok(counts)
}

/// Entry point for the bundled-dataset seeder: parse the JSON fixture and
/// import it in one transaction.
pub async fn bulk_import_json(pool: &SqlitePool, json: &str) -> Result<ImportCounts> {
    let data: ImportData = serde_json::from_str(json)?;
    bulk_import(pool, &data).await
}
