use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a set's resistance came from. Bodyweight sets are stored with a
/// sentinel weight of 1 so volume math never multiplies by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LoadType {
    Weighted,
    Bodyweight,
}

impl LoadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadType::Weighted => "weighted",
            LoadType::Bodyweight => "bodyweight",
        }
    }
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Workout models
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
    pub id: i64,
    pub date: String,
    pub notes: Option<String>,
    pub created_at: String,
}

// Exercise models
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub created_at: String,
    /// Non-null only for built-in exercises, which render through
    /// translation lookup. Custom exercises render their stored name.
    pub i18n_key: Option<String>,
}

impl Exercise {
    pub fn is_default(&self) -> bool {
        self.i18n_key.is_some()
    }

    /// Identifier that survives a language change: the translation key for
    /// built-ins, the raw name for custom exercises.
    pub fn stable_id(&self) -> &str {
        self.i18n_key.as_deref().unwrap_or(&self.name)
    }
}

// Set models
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSet {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub weight: f64,
    pub reps: i64,
    pub load_type: LoadType,
    pub set_order: i64,
    pub created_at: String,
}

impl fmt::Display for WorkoutSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}kg x {} reps", self.weight, self.reps)
    }
}

/// One row of the joined history query: a set together with the exercise
/// and workout it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SetDetail {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub weight: f64,
    pub reps: i64,
    pub load_type: LoadType,
    pub set_order: i64,
    pub exercise_name: String,
    pub exercise_category: String,
    pub exercise_i18n_key: Option<String>,
    pub workout_date: String,
}

// Aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutStats {
    pub total_workouts: i64,
    pub total_sets: i64,
    pub total_volume: f64,
    pub unique_exercises: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeeklyStats {
    pub workouts: i64,
    pub sets: i64,
    pub volume: f64,
    pub active_days: i64,
}

// Bulk import payload. Sets reference their parents by position in the
// surrounding arrays; ids are resolved during the import transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportData {
    pub workouts: Vec<ImportWorkout>,
    pub exercises: Vec<ImportExercise>,
    pub sets: Vec<ImportSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportWorkout {
    pub date: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportExercise {
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSet {
    pub workout_index: usize,
    pub exercise_index: usize,
    pub weight: f64,
    pub reps: i64,
    pub load_type: LoadType,
    pub set_order: i64,
}

/// Rows actually created by a bulk import. Exercises that already existed
/// are resolved to their ids but not recounted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCounts {
    pub workouts: u64,
    pub exercises: u64,
    pub sets: u64,
}
