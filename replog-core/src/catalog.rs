//! Built-in exercise catalog.
//!
//! The seed list carries the translation key for every default exercise;
//! the localized-name table lets the migration backfill recover that key
//! for rows created before keys were persisted, whatever display language
//! the app was running in at the time.

/// A catalog entry seeded by the app.
#[derive(Debug, Clone, Copy)]
pub struct DefaultExercise {
    pub name: &'static str,
    pub category: &'static str,
    pub i18n_key: &'static str,
}

pub const DEFAULT_EXERCISES: &[DefaultExercise] = &[
    DefaultExercise { name: "Bench Press", category: "Presses", i18n_key: "exercise.bench_press" },
    DefaultExercise { name: "Overhead Press", category: "Presses", i18n_key: "exercise.overhead_press" },
    DefaultExercise { name: "Incline Bench Press", category: "Presses", i18n_key: "exercise.incline_bench_press" },
    DefaultExercise { name: "Dip", category: "Presses", i18n_key: "exercise.dip" },
    DefaultExercise { name: "Barbell Row", category: "Pulls", i18n_key: "exercise.barbell_row" },
    DefaultExercise { name: "Pull-up", category: "Pulls", i18n_key: "exercise.pull_up" },
    DefaultExercise { name: "Chin-up", category: "Pulls", i18n_key: "exercise.chin_up" },
    DefaultExercise { name: "Lat Pulldown", category: "Pulls", i18n_key: "exercise.lat_pulldown" },
    DefaultExercise { name: "Back Squat", category: "Squats", i18n_key: "exercise.back_squat" },
    DefaultExercise { name: "Front Squat", category: "Squats", i18n_key: "exercise.front_squat" },
    DefaultExercise { name: "Leg Press", category: "Squats", i18n_key: "exercise.leg_press" },
    DefaultExercise { name: "Lunge", category: "Squats", i18n_key: "exercise.lunge" },
    DefaultExercise { name: "Deadlift", category: "Hinges", i18n_key: "exercise.deadlift" },
    DefaultExercise { name: "Romanian Deadlift", category: "Hinges", i18n_key: "exercise.romanian_deadlift" },
    DefaultExercise { name: "Hip Thrust", category: "Hinges", i18n_key: "exercise.hip_thrust" },
    DefaultExercise { name: "Biceps Curl", category: "Arms", i18n_key: "exercise.biceps_curl" },
    DefaultExercise { name: "Triceps Extension", category: "Arms", i18n_key: "exercise.triceps_extension" },
    DefaultExercise { name: "Plank", category: "Core", i18n_key: "exercise.plank" },
    DefaultExercise { name: "Hanging Leg Raise", category: "Core", i18n_key: "exercise.hanging_leg_raise" },
];

// Known default exercise names across all supported display languages
// (en, es, de, fr), mapped to their translation key. Consulted only by the
// migration backfill; new rows get their key at insert time.
const LOCALIZED_NAMES: &[(&str, &str)] = &[
    ("Bench Press", "exercise.bench_press"),
    ("Press de banca", "exercise.bench_press"),
    ("Bankdrücken", "exercise.bench_press"),
    ("Développé couché", "exercise.bench_press"),
    ("Overhead Press", "exercise.overhead_press"),
    ("Press militar", "exercise.overhead_press"),
    ("Schulterdrücken", "exercise.overhead_press"),
    ("Développé militaire", "exercise.overhead_press"),
    ("Incline Bench Press", "exercise.incline_bench_press"),
    ("Press inclinado", "exercise.incline_bench_press"),
    ("Schrägbankdrücken", "exercise.incline_bench_press"),
    ("Développé incliné", "exercise.incline_bench_press"),
    ("Dip", "exercise.dip"),
    ("Fondos", "exercise.dip"),
    ("Dips", "exercise.dip"),
    ("Barbell Row", "exercise.barbell_row"),
    ("Remo con barra", "exercise.barbell_row"),
    ("Langhantelrudern", "exercise.barbell_row"),
    ("Rowing barre", "exercise.barbell_row"),
    ("Pull-up", "exercise.pull_up"),
    ("Dominada", "exercise.pull_up"),
    ("Klimmzug", "exercise.pull_up"),
    ("Traction", "exercise.pull_up"),
    ("Chin-up", "exercise.chin_up"),
    ("Dominada supina", "exercise.chin_up"),
    ("Klimmzug im Untergriff", "exercise.chin_up"),
    ("Traction supination", "exercise.chin_up"),
    ("Lat Pulldown", "exercise.lat_pulldown"),
    ("Jalón al pecho", "exercise.lat_pulldown"),
    ("Latzug", "exercise.lat_pulldown"),
    ("Tirage vertical", "exercise.lat_pulldown"),
    ("Back Squat", "exercise.back_squat"),
    ("Sentadilla trasera", "exercise.back_squat"),
    ("Kniebeuge", "exercise.back_squat"),
    ("Squat arrière", "exercise.back_squat"),
    ("Front Squat", "exercise.front_squat"),
    ("Sentadilla frontal", "exercise.front_squat"),
    ("Frontkniebeuge", "exercise.front_squat"),
    ("Squat avant", "exercise.front_squat"),
    ("Leg Press", "exercise.leg_press"),
    ("Prensa de piernas", "exercise.leg_press"),
    ("Beinpresse", "exercise.leg_press"),
    ("Presse à cuisses", "exercise.leg_press"),
    ("Lunge", "exercise.lunge"),
    ("Zancada", "exercise.lunge"),
    ("Ausfallschritt", "exercise.lunge"),
    ("Fente", "exercise.lunge"),
    ("Deadlift", "exercise.deadlift"),
    ("Peso muerto", "exercise.deadlift"),
    ("Kreuzheben", "exercise.deadlift"),
    ("Soulevé de terre", "exercise.deadlift"),
    ("Romanian Deadlift", "exercise.romanian_deadlift"),
    ("Peso muerto rumano", "exercise.romanian_deadlift"),
    ("Rumänisches Kreuzheben", "exercise.romanian_deadlift"),
    ("Soulevé de terre roumain", "exercise.romanian_deadlift"),
    ("Hip Thrust", "exercise.hip_thrust"),
    ("Empuje de cadera", "exercise.hip_thrust"),
    ("Hüftstoß", "exercise.hip_thrust"),
    ("Extension de hanche", "exercise.hip_thrust"),
    ("Biceps Curl", "exercise.biceps_curl"),
    ("Curl de bíceps", "exercise.biceps_curl"),
    ("Bizepscurl", "exercise.biceps_curl"),
    ("Curl biceps", "exercise.biceps_curl"),
    ("Triceps Extension", "exercise.triceps_extension"),
    ("Extensión de tríceps", "exercise.triceps_extension"),
    ("Trizepsstrecken", "exercise.triceps_extension"),
    ("Extension triceps", "exercise.triceps_extension"),
    ("Plank", "exercise.plank"),
    ("Plancha", "exercise.plank"),
    ("Unterarmstütz", "exercise.plank"),
    ("Gainage", "exercise.plank"),
    ("Hanging Leg Raise", "exercise.hanging_leg_raise"),
    ("Elevación de piernas colgado", "exercise.hanging_leg_raise"),
    ("Hängendes Beinheben", "exercise.hanging_leg_raise"),
    ("Relevé de jambes suspendu", "exercise.hanging_leg_raise"),
];

/// Translation key for a known default exercise name in any supported
/// locale. `None` for custom exercise names.
pub fn i18n_key_for_name(name: &str) -> Option<&'static str> {
    LOCALIZED_NAMES
        .iter()
        .find(|(localized, _)| *localized == name)
        .map(|(_, key)| *key)
}
