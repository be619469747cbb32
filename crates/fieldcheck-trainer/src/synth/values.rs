//! Field value builders, one per quality tag.

use fieldcheck_core::{QualityTag, TrackedField};

use super::pools::*;
use crate::rng::SeededRng;

/// Draws a value for `field` whose quality is exactly `tag`.
///
/// `Missing` is always the empty string and no other tag ever yields one.
pub fn value_for(rng: &mut SeededRng, field: TrackedField, tag: QualityTag) -> String {
    match tag {
        QualityTag::Ok => ok_value(rng, field),
        QualityTag::Missing => String::new(),
        QualityTag::Vague => vague_value(rng, field),
        QualityTag::Invalid => invalid_value(rng, field),
    }
}

/// The tag a field degrades to when a report is sloppy rather than blank:
/// free text gets vague, structured fields get malformed.
pub fn degraded_tag(field: TrackedField) -> QualityTag {
    if field.is_free_text() {
        QualityTag::Vague
    } else {
        QualityTag::Invalid
    }
}

fn ok_value(rng: &mut SeededRng, field: TrackedField) -> String {
    match field {
        TrackedField::FullName => {
            format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES))
        }
        TrackedField::Email => format!(
            "{}.{}@{}",
            rng.pick(FIRST_NAMES).to_lowercase(),
            rng.pick(LAST_NAMES).to_lowercase(),
            rng.pick(EMAIL_DOMAINS)
        ),
        TrackedField::FeedbackType => rng.pick(FEEDBACK_TYPES).to_string(),
        TrackedField::AppVersion => valid_version(rng),
        TrackedField::StepsToReproduce => format!(
            "On {}, when I {}, the app {}.",
            rng.pick(DEVICES),
            rng.pick(ACTIONS),
            rng.pick(ISSUES)
        ),
        TrackedField::ExpectedBehavior => {
            format!("The app should {} without errors.", rng.pick(EXPECTED_VERBS))
        }
        TrackedField::ActualBehavior => format!("Instead, it {}.", rng.pick(ISSUES)),
    }
}

fn vague_value(rng: &mut SeededRng, field: TrackedField) -> String {
    let pool = match field {
        TrackedField::ExpectedBehavior => VAGUE_EXPECTED,
        TrackedField::ActualBehavior => VAGUE_ACTUAL,
        _ => VAGUE_STEPS,
    };
    rng.pick(pool).to_string()
}

fn invalid_value(rng: &mut SeededRng, field: TrackedField) -> String {
    match field {
        TrackedField::FullName => match rng.below(3) {
            0 | 1 => format!("{}{}", rng.pick(LOREM), rng.between(100, 999)),
            _ => format!("{}_{}", rng.pick(LOREM), rng.pick(LOREM)),
        },
        TrackedField::Email => match rng.below(4) {
            0 => format!("{}.com", rng.pick(LOREM)),
            1 => format!("{}@", rng.pick(LOREM)),
            2 => format!("{} at {}.com", rng.pick(LOREM), rng.pick(LOREM)),
            _ => format!("{}@@{}", rng.pick(LOREM), rng.pick(LOREM)),
        },
        TrackedField::FeedbackType => rng.pick(INVALID_FEEDBACK_TYPES).to_string(),
        TrackedField::AppVersion => invalid_version(rng),
        TrackedField::StepsToReproduce
        | TrackedField::ExpectedBehavior
        | TrackedField::ActualBehavior => nonsense(rng),
    }
}

/// `v{major}.{minor}.{patch}` with an optional pre-release suffix.
pub fn valid_version(rng: &mut SeededRng) -> String {
    format!(
        "v{}.{}.{}{}",
        rng.between(0, 5),
        rng.between(0, 9),
        rng.between(0, 9),
        rng.pick(VERSION_SUFFIXES)
    )
}

/// A version string that is not `v<major>.<minor>.<patch>`.
pub fn invalid_version(rng: &mut SeededRng) -> String {
    match rng.below(6) {
        0 => "v1".to_string(),
        1 => "1.0".to_string(),
        2 => format!("ver{}", rng.between(6, 99)),
        3 => format!("version{}", rng.between(100, 999)),
        4 => format!("v{}", rng.pick(LOREM)),
        _ => "latest".to_string(),
    }
}

/// Two to four filler words.
fn nonsense(rng: &mut SeededRng) -> String {
    let n = rng.between(2, 4) as usize;
    (0..n)
        .map(|_| *rng.pick(LOREM))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_semver(v: &str) -> bool {
        let Some(rest) = v.strip_prefix('v') else {
            return false;
        };
        let core = rest.split('-').next().unwrap_or("");
        let parts: Vec<_> = core.split('.').collect();
        parts.len() == 3 && parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn valid_versions_are_semver() {
        let mut rng = SeededRng::new(3);
        for _ in 0..200 {
            assert!(is_semver(&valid_version(&mut rng)));
        }
    }

    #[test]
    fn invalid_versions_are_not_semver() {
        let mut rng = SeededRng::new(3);
        for _ in 0..200 {
            let v = invalid_version(&mut rng);
            assert!(!v.is_empty());
            assert!(!is_semver(&v), "{v}");
        }
    }

    #[test]
    fn only_missing_is_empty() {
        let mut rng = SeededRng::new(11);
        for field in TrackedField::ALL {
            for tag in QualityTag::ALL {
                for _ in 0..20 {
                    let value = value_for(&mut rng, field, tag);
                    assert_eq!(value.is_empty(), tag == QualityTag::Missing, "{field} {tag}");
                }
            }
        }
    }

    #[test]
    fn ok_emails_have_an_at_sign() {
        let mut rng = SeededRng::new(5);
        for _ in 0..50 {
            let email = value_for(&mut rng, TrackedField::Email, QualityTag::Ok);
            assert_eq!(email.matches('@').count(), 1);
            assert!(email.contains('.'));
        }
    }

    #[test]
    fn invalid_names_are_not_two_capitalized_words() {
        let mut rng = SeededRng::new(9);
        for _ in 0..50 {
            let name = value_for(&mut rng, TrackedField::FullName, QualityTag::Invalid);
            assert!(name.chars().next().is_some_and(|c| c.is_lowercase()));
        }
    }

    #[test]
    fn degraded_tags() {
        assert_eq!(degraded_tag(TrackedField::ActualBehavior), QualityTag::Vague);
        assert_eq!(degraded_tag(TrackedField::AppVersion), QualityTag::Invalid);
    }
}
