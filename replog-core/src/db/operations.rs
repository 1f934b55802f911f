use anyhow::Result;
use chrono::{Duration, Utc};
use log::info;
use sqlx::SqlitePool;

use crate::catalog::DefaultExercise;
use crate::db::models::{
    Exercise, LoadType, SetDetail, WeeklyStats, Workout, WorkoutSet, WorkoutStats,
};

// Workouts
pub async fn create_workout(pool: &SqlitePool, date: &str, notes: Option<&str>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO workouts (date, notes) VALUES (?1, ?2)")
        .bind(date)
        .bind(notes)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_workout(pool: &SqlitePool, workout_id: i64) -> Result<Workout> {
    sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE id = ?1")
        .bind(workout_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

pub async fn get_all_workouts(pool: &SqlitePool) -> Result<Vec<Workout>> {
    sqlx::query_as::<_, Workout>("SELECT * FROM workouts ORDER BY date DESC")
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

/// Inclusive range scan over ISO-8601 date strings, newest first.
pub async fn get_workouts_by_date_range(
    pool: &SqlitePool,
    from: &str,
    to: &str,
) -> Result<Vec<Workout>> {
    sqlx::query_as::<_, Workout>(
        "SELECT * FROM workouts WHERE date >= ?1 AND date <= ?2 ORDER BY date DESC",
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Returns the affected-row count; an absent id yields 0, not an error.
pub async fn update_workout(
    pool: &SqlitePool,
    workout_id: i64,
    date: &str,
    notes: Option<&str>,
) -> Result<u64> {
    let result = sqlx::query("UPDATE workouts SET date = ?1, notes = ?2 WHERE id = ?3")
        .bind(date)
        .bind(notes)
        .bind(workout_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Cascades to the workout's sets.
pub async fn delete_workout(pool: &SqlitePool, workout_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = ?1")
        .bind(workout_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// Exercises
/// Insert-or-return-existing on the unique (name, category) pair. The
/// returned id may denote a row that already existed.
pub async fn create_exercise(pool: &SqlitePool, name: &str, category: &str) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO exercises (name, category) VALUES (?1, ?2)
         ON CONFLICT(name, category) DO UPDATE SET name = excluded.name
         RETURNING id",
    )
    .bind(name)
    .bind(category)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<Exercise> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE id = ?1")
        .bind(exercise_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

pub async fn get_all_exercises(pool: &SqlitePool) -> Result<Vec<Exercise>> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises ORDER BY category, name")
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

/// Full overwrite of name and category. The i18n key is left untouched, so
/// a renamed built-in keeps rendering through translation lookup. Returns
/// the affected-row count; an absent id yields 0.
pub async fn update_exercise(
    pool: &SqlitePool,
    exercise_id: i64,
    name: &str,
    category: &str,
) -> Result<u64> {
    let result = sqlx::query("UPDATE exercises SET name = ?1, category = ?2 WHERE id = ?3")
        .bind(name)
        .bind(category)
        .bind(exercise_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Cascades to every set that referenced the exercise.
pub async fn delete_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM exercises WHERE id = ?1")
        .bind(exercise_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Insert each catalog entry whose (name, category) pair is not present
/// yet; existing pairs are left alone. Returns the number inserted.
pub async fn seed_default_exercises(
    pool: &SqlitePool,
    defaults: &[DefaultExercise],
) -> Result<u64> {
    let mut inserted = 0;
    for default in defaults {
        inserted += sqlx::query(
            "INSERT OR IGNORE INTO exercises (name, category, i18n_key) VALUES (?1, ?2, ?3)",
        )
        .bind(default.name)
        .bind(default.category)
        .bind(default.i18n_key)
        .execute(pool)
        .await?
        .rows_affected();
    }

    if inserted > 0 {
        info!("Seeded {} default exercises", inserted);
    }
    Ok(inserted)
}

// Sets
/// Both foreign keys must reference existing rows or the insert fails with
/// a constraint violation. Callers substitute the bodyweight sentinel
/// weight before calling.
pub async fn create_set(
    pool: &SqlitePool,
    workout_id: i64,
    exercise_id: i64,
    weight: f64,
    reps: i64,
    load_type: LoadType,
    set_order: i64,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO sets (workout_id, exercise_id, weight, reps, load_type, set_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(workout_id)
    .bind(exercise_id)
    .bind(weight)
    .bind(reps)
    .bind(load_type)
    .bind(set_order)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_sets_for_workout(pool: &SqlitePool, workout_id: i64) -> Result<Vec<WorkoutSet>> {
    sqlx::query_as::<_, WorkoutSet>(
        "SELECT * FROM sets WHERE workout_id = ?1 ORDER BY set_order",
    )
    .bind(workout_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Full history join, newest workout first, sets in display order. The
/// optional limit caps the row count on large histories.
pub async fn get_all_sets_with_details(
    pool: &SqlitePool,
    limit: Option<i64>,
) -> Result<Vec<SetDetail>> {
    sqlx::query_as::<_, SetDetail>(
        "SELECT s.id, s.workout_id, s.exercise_id, s.weight, s.reps, s.load_type, s.set_order,
                e.name AS exercise_name, e.category AS exercise_category,
                e.i18n_key AS exercise_i18n_key, w.date AS workout_date
         FROM sets s
         JOIN exercises e ON e.id = s.exercise_id
         JOIN workouts w ON w.id = s.workout_id
         ORDER BY w.date DESC, s.set_order
         LIMIT ?1",
    )
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Partial update: with `None` for `load_type`, only weight and reps
/// change. Returns the affected-row count; an absent id yields 0.
pub async fn update_set(
    pool: &SqlitePool,
    set_id: i64,
    weight: f64,
    reps: i64,
    load_type: Option<LoadType>,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE sets SET weight = ?1, reps = ?2, load_type = COALESCE(?3, load_type)
         WHERE id = ?4",
    )
    .bind(weight)
    .bind(reps)
    .bind(load_type)
    .bind(set_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete_set(pool: &SqlitePool, set_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sets WHERE id = ?1")
        .bind(set_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// Aggregates
/// Lifetime totals. Zeroed, not an error, on an empty store.
pub async fn get_workout_stats(pool: &SqlitePool) -> Result<WorkoutStats> {
    sqlx::query_as::<_, WorkoutStats>(
        "SELECT
            (SELECT COUNT(*) FROM workouts) AS total_workouts,
            (SELECT COUNT(*) FROM sets) AS total_sets,
            (SELECT COALESCE(SUM(weight * reps), 0.0) FROM sets) AS total_volume,
            (SELECT COUNT(DISTINCT exercise_id) FROM sets) AS unique_exercises",
    )
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

/// Totals over the trailing seven days, with a distinct active-day count.
pub async fn get_weekly_stats(pool: &SqlitePool) -> Result<WeeklyStats> {
    let cutoff = (Utc::now() - Duration::days(7)).to_rfc3339();
    sqlx::query_as::<_, WeeklyStats>(
        "SELECT COUNT(DISTINCT w.id) AS workouts,
                COUNT(s.id) AS sets,
                COALESCE(SUM(s.weight * s.reps), 0.0) AS volume,
                COUNT(DISTINCT date(w.date)) AS active_days
         FROM workouts w
         LEFT JOIN sets s ON s.workout_id = w.id
         WHERE w.date >= ?1",
    )
    .bind(cutoff)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_EXERCISES;
    use crate::db::connect_in_memory;

    #[tokio::test]
    async fn duplicate_exercise_pair_returns_the_same_id_and_one_row() {
        let pool = connect_in_memory().await.unwrap();

        let first = create_exercise(&pool, "Back Squat", "Squats").await.unwrap();
        let second = create_exercise(&pool, "Back Squat", "Squats").await.unwrap();
        assert_eq!(first, second);

        // Same name under another category is a distinct row.
        let other = create_exercise(&pool, "Back Squat", "Warmups").await.unwrap();
        assert_ne!(first, other);

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM exercises WHERE name = 'Back Squat' AND category = 'Squats'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn deleting_either_parent_removes_the_sets() {
        let pool = connect_in_memory().await.unwrap();

        let workout = create_workout(&pool, "2026-08-01T09:00:00Z", None).await.unwrap();
        let squat = create_exercise(&pool, "Back Squat", "Squats").await.unwrap();
        let bench = create_exercise(&pool, "Bench Press", "Presses").await.unwrap();
        create_set(&pool, workout, squat, 100.0, 5, LoadType::Weighted, 0).await.unwrap();
        create_set(&pool, workout, bench, 60.0, 8, LoadType::Weighted, 1).await.unwrap();

        assert_eq!(delete_exercise(&pool, squat).await.unwrap(), 1);
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sets")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 1);

        assert_eq!(delete_workout(&pool, workout).await.unwrap(), 1);
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sets")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn set_insert_with_missing_parents_is_rejected() {
        let pool = connect_in_memory().await.unwrap();
        let result = create_set(&pool, 999, 999, 100.0, 5, LoadType::Weighted, 0).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn stats_sum_volume_across_workouts() {
        let pool = connect_in_memory().await.unwrap();

        let day_one = create_workout(&pool, "2026-08-01T09:00:00Z", None).await.unwrap();
        let day_two = create_workout(&pool, "2026-08-02T09:00:00Z", None).await.unwrap();
        let squat = create_exercise(&pool, "Back Squat", "Squats").await.unwrap();
        let bench = create_exercise(&pool, "Bench Press", "Presses").await.unwrap();

        create_set(&pool, day_one, bench, 60.0, 8, LoadType::Weighted, 0).await.unwrap();
        create_set(&pool, day_one, squat, 100.0, 5, LoadType::Weighted, 1).await.unwrap();
        create_set(&pool, day_two, bench, 62.0, 7, LoadType::Weighted, 0).await.unwrap();

        let stats = get_workout_stats(&pool).await.unwrap();
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.total_sets, 3);
        assert_eq!(stats.unique_exercises, 2);
        assert!((stats.total_volume - 1414.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_store_reports_zeroes_instead_of_failing() {
        let pool = connect_in_memory().await.unwrap();

        let stats = get_workout_stats(&pool).await.unwrap();
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.total_sets, 0);
        assert_eq!(stats.unique_exercises, 0);
        assert_eq!(stats.total_volume, 0.0);

        let weekly = get_weekly_stats(&pool).await.unwrap();
        assert_eq!(weekly.workouts, 0);
        assert_eq!(weekly.sets, 0);
        assert_eq!(weekly.active_days, 0);
        assert_eq!(weekly.volume, 0.0);
    }

    #[tokio::test]
    async fn weekly_stats_only_count_the_trailing_seven_days() {
        let pool = connect_in_memory().await.unwrap();

        let recent_date = Utc::now().to_rfc3339();
        let recent = create_workout(&pool, &recent_date, None).await.unwrap();
        let ancient = create_workout(&pool, "2020-01-01T10:00:00Z", None).await.unwrap();
        let squat = create_exercise(&pool, "Back Squat", "Squats").await.unwrap();
        create_set(&pool, recent, squat, 100.0, 5, LoadType::Weighted, 0).await.unwrap();
        create_set(&pool, ancient, squat, 90.0, 5, LoadType::Weighted, 0).await.unwrap();

        let weekly = get_weekly_stats(&pool).await.unwrap();
        assert_eq!(weekly.workouts, 1);
        assert_eq!(weekly.sets, 1);
        assert_eq!(weekly.active_days, 1);
        assert!((weekly.volume - 500.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn joined_query_round_trips_through_an_update() {
        let pool = connect_in_memory().await.unwrap();

        let workout = create_workout(&pool, "2026-08-01T09:00:00Z", Some("am session"))
            .await
            .unwrap();
        let bench = create_exercise(&pool, "Bench Press", "Presses").await.unwrap();
        let set_id = create_set(&pool, workout, bench, 60.0, 8, LoadType::Weighted, 0)
            .await
            .unwrap();

        let details = get_all_sets_with_details(&pool, None).await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].exercise_name, "Bench Press");
        assert_eq!(details[0].exercise_category, "Presses");
        assert_eq!(details[0].workout_date, "2026-08-01T09:00:00Z");
        assert_eq!(details[0].weight, 60.0);
        assert_eq!(details[0].reps, 8);

        assert_eq!(update_set(&pool, set_id, 62.5, 6, None).await.unwrap(), 1);

        let details = get_all_sets_with_details(&pool, None).await.unwrap();
        assert_eq!(details[0].weight, 62.5);
        assert_eq!(details[0].reps, 6);
        assert_eq!(details[0].load_type, LoadType::Weighted);
    }

    #[tokio::test]
    async fn joined_query_orders_by_date_then_set_order_and_honors_the_limit() {
        let pool = connect_in_memory().await.unwrap();

        let older = create_workout(&pool, "2026-08-01T09:00:00Z", None).await.unwrap();
        let newer = create_workout(&pool, "2026-08-03T09:00:00Z", None).await.unwrap();
        let squat = create_exercise(&pool, "Back Squat", "Squats").await.unwrap();

        create_set(&pool, older, squat, 90.0, 5, LoadType::Weighted, 0).await.unwrap();
        create_set(&pool, newer, squat, 100.0, 5, LoadType::Weighted, 1).await.unwrap();
        create_set(&pool, newer, squat, 95.0, 5, LoadType::Weighted, 0).await.unwrap();

        let details = get_all_sets_with_details(&pool, None).await.unwrap();
        assert_eq!(details.len(), 3);
        assert_eq!(details[0].workout_id, newer);
        assert_eq!(details[0].set_order, 0);
        assert_eq!(details[1].workout_id, newer);
        assert_eq!(details[1].set_order, 1);
        assert_eq!(details[2].workout_id, older);

        let capped = get_all_sets_with_details(&pool, Some(2)).await.unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[tokio::test]
    async fn update_set_can_flip_the_load_type() {
        let pool = connect_in_memory().await.unwrap();

        let workout = create_workout(&pool, "2026-08-01T09:00:00Z", None).await.unwrap();
        let dips = create_exercise(&pool, "Dip", "Presses").await.unwrap();
        // Bodyweight sentinel substituted by the caller.
        let set_id = create_set(&pool, workout, dips, 1.0, 12, LoadType::Bodyweight, 0)
            .await
            .unwrap();

        update_set(&pool, set_id, 10.0, 8, Some(LoadType::Weighted))
            .await
            .unwrap();

        let sets = get_sets_for_workout(&pool, workout).await.unwrap();
        assert_eq!(sets[0].load_type, LoadType::Weighted);
        assert_eq!(sets[0].weight, 10.0);
        assert_eq!(sets[0].reps, 8);
    }

    #[tokio::test]
    async fn updates_and_deletes_of_absent_ids_report_zero_rows() {
        let pool = connect_in_memory().await.unwrap();

        assert_eq!(update_workout(&pool, 42, "2026-08-01T09:00:00Z", None).await.unwrap(), 0);
        assert_eq!(update_exercise(&pool, 42, "Bench Press", "Presses").await.unwrap(), 0);
        assert_eq!(update_set(&pool, 42, 50.0, 5, None).await.unwrap(), 0);
        assert_eq!(delete_workout(&pool, 42).await.unwrap(), 0);
        assert_eq!(delete_exercise(&pool, 42).await.unwrap(), 0);
        assert_eq!(delete_set(&pool, 42).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn date_range_is_inclusive_and_newest_first() {
        let pool = connect_in_memory().await.unwrap();

        create_workout(&pool, "2026-08-01T09:00:00Z", None).await.unwrap();
        create_workout(&pool, "2026-08-03T09:00:00Z", None).await.unwrap();
        create_workout(&pool, "2026-08-05T09:00:00Z", None).await.unwrap();
        create_workout(&pool, "2026-07-20T09:00:00Z", None).await.unwrap();

        let workouts = get_workouts_by_date_range(
            &pool,
            "2026-08-01T09:00:00Z",
            "2026-08-05T09:00:00Z",
        )
        .await
        .unwrap();
        assert_eq!(workouts.len(), 3);
        assert_eq!(workouts[0].date, "2026-08-05T09:00:00Z");
        assert_eq!(workouts[2].date, "2026-08-01T09:00:00Z");

        let none = get_workouts_by_date_range(&pool, "2027-01-01", "2027-12-31").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn seeding_is_idempotent_and_keys_survive_reads() {
        let pool = connect_in_memory().await.unwrap();

        let first = seed_default_exercises(&pool, DEFAULT_EXERCISES).await.unwrap();
        assert_eq!(first, DEFAULT_EXERCISES.len() as u64);
        let second = seed_default_exercises(&pool, DEFAULT_EXERCISES).await.unwrap();
        assert_eq!(second, 0);

        let custom = create_exercise(&pool, "Cable Woodchopper", "Core").await.unwrap();

        for exercise in get_all_exercises(&pool).await.unwrap() {
            if exercise.id == custom {
                assert!(!exercise.is_default());
                assert_eq!(exercise.stable_id(), "Cable Woodchopper");
            } else {
                assert!(exercise.is_default());
                assert!(exercise.i18n_key.as_deref().unwrap().starts_with("exercise."));
            }
        }
    }

    #[tokio::test]
    async fn renaming_a_default_keeps_its_translation_key() {
        let pool = connect_in_memory().await.unwrap();

        seed_default_exercises(&pool, DEFAULT_EXERCISES).await.unwrap();
        let bench = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM exercises WHERE name = 'Bench Press'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(update_exercise(&pool, bench, "Paused Bench", "Presses").await.unwrap(), 1);

        let exercise = get_exercise(&pool, bench).await.unwrap();
        assert_eq!(exercise.name, "Paused Bench");
        assert_eq!(exercise.i18n_key.as_deref(), Some("exercise.bench_press"));
    }
}
