//! Meal coverage heuristics.
//!
//! A meal counts as planned when an activity starts inside the meal's window
//! and either is a dining activity or mentions one of the meal's keywords.

use crate::output::DetailedActivity;

/// A meal with its time window and keywords.
#[derive(Debug, Clone, Copy)]
struct Meal {
    /// Window start, minutes since midnight (inclusive).
    from: u32,
    /// Window end, minutes since midnight (exclusive).
    until: u32,
    keywords: &'static [&'static str],
}

const BREAKFAST: Meal = Meal {
    from: 6 * 60,
    until: 11 * 60,
    keywords: &["breakfast", "brunch", "cafe"],
};

const LUNCH: Meal = Meal {
    from: 11 * 60,
    until: 15 * 60,
    keywords: &["lunch", "brunch", "restaurant"],
};

const DINNER: Meal = Meal {
    from: 17 * 60,
    until: 22 * 60,
    keywords: &["dinner", "restaurant"],
};

/// Which meals a day covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealCoverage {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

fn covers(activity: &DetailedActivity, meal: Meal) -> bool {
    if !(meal.from..meal.until).contains(&activity.start_minute) {
        return false;
    }
    if activity.activity.is_type("dining") {
        return true;
    }
    let name = activity.activity.name.to_lowercase();
    meal.keywords
        .iter()
        .any(|kw| name.contains(kw) || activity.activity.is_type(kw))
}

/// Checks a day's activities for breakfast, lunch and dinner.
pub fn meal_coverage(activities: &[DetailedActivity]) -> MealCoverage {
    let has = |meal: Meal| activities.iter().any(|a| covers(a, meal));
    MealCoverage {
        breakfast: has(BREAKFAST),
        lunch: has(LUNCH),
        dinner: has(DINNER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Activity;

    fn at(name: &str, activity_type: &str, start_minute: u32) -> DetailedActivity {
        DetailedActivity {
            activity: Activity {
                name: name.to_string(),
                activity_type: activity_type.to_string(),
                ..Default::default()
            },
            day_number: 1,
            start_minute,
            end_minute: start_minute + 60,
            conflicts: Vec::new(),
            weather_suitable: true,
        }
    }

    #[test]
    fn empty_day_has_no_meals() {
        assert_eq!(meal_coverage(&[]), MealCoverage::default());
    }

    #[test]
    fn dining_in_window_counts() {
        let coverage = meal_coverage(&[at("Sunset Dinner", "dining", 19 * 60 + 30)]);
        assert!(coverage.dinner);
        assert!(!coverage.lunch);
        assert!(!coverage.breakfast);
    }

    #[test]
    fn keyword_in_name_counts_case_insensitively() {
        let coverage = meal_coverage(&[at("Harbour BRUNCH", "social", 10 * 60 + 45)]);
        assert!(coverage.breakfast);
        assert!(!coverage.lunch, "10:45 is before the lunch window");
    }

    #[test]
    fn keyword_as_type_counts() {
        let coverage = meal_coverage(&[at("Tasca do Chico", "restaurant", 13 * 60)]);
        assert!(coverage.lunch);
    }

    #[test]
    fn window_bounds_are_half_open() {
        assert!(meal_coverage(&[at("Early", "dining", 6 * 60)]).breakfast);
        assert!(!meal_coverage(&[at("Late", "dining", 11 * 60)]).breakfast);
        assert!(meal_coverage(&[at("Late", "dining", 11 * 60)]).lunch);
        assert!(!meal_coverage(&[at("Supper", "dining", 22 * 60)]).dinner);
    }

    #[test]
    fn keyword_outside_window_does_not_count() {
        let coverage = meal_coverage(&[at("Lunch cruise", "boat", 16 * 60)]);
        assert_eq!(coverage, MealCoverage::default());
    }

    #[test]
    fn unrelated_activity_in_window_does_not_count() {
        let coverage = meal_coverage(&[at("Castle", "sightseeing", 12 * 60)]);
        assert!(!coverage.lunch);
    }
}
