use sha2::{Digest, Sha256};

use crate::domain::{
    classification::{
        entities::{Classification, DietPreference},
        value_objects::Fingerprint,
    },
    common::entities::app_errors::CoreError,
};

const TEXT_SEPARATOR: u8 = 0x1e;
const CONDITION_SEPARATOR: u8 = 0x1f;

/// Deterministic cache key for a text and a set of conditions.
///
/// Conditions are sorted before hashing, so any permutation of the same
/// set yields the same key.
pub fn fingerprint<S: AsRef<str>>(text: &str, conditions: &[S]) -> Fingerprint {
    let mut sorted: Vec<&str> = conditions.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update([TEXT_SEPARATOR]);
    for (index, condition) in sorted.iter().enumerate() {
        if index > 0 {
            hasher.update([CONDITION_SEPARATOR]);
        }
        hasher.update(condition.as_bytes());
    }

    Fingerprint::from_digest(hex::encode(hasher.finalize()))
}

/// Joins conditions into a natural-language list with a serial comma.
pub fn join_conditions<S: AsRef<str>>(conditions: &[S]) -> String {
    match conditions {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}, and {}", head, last.as_ref())
        }
    }
}

/// Candidate labels for a suitability query; the suitable variant comes first.
pub fn suitability_labels(subject: &str) -> Vec<String> {
    vec![
        format!("suitable for {}", subject),
        format!("not suitable for {}", subject),
    ]
}

pub fn diet_labels() -> Vec<String> {
    DietPreference::ALL
        .iter()
        .map(|diet| diet.label().to_string())
        .collect()
}

/// Rejects classifier answers that do not rank exactly the candidates we asked about.
pub fn ensure_candidates(
    classification: &Classification,
    candidates: &[String],
) -> Result<(), CoreError> {
    if classification.labels.len() != classification.scores.len() {
        return Err(CoreError::ExternalServiceError(format!(
            "classifier returned {} labels but {} scores",
            classification.labels.len(),
            classification.scores.len()
        )));
    }

    let mut returned: Vec<&str> = classification.labels.iter().map(String::as_str).collect();
    let mut expected: Vec<&str> = candidates.iter().map(String::as_str).collect();
    returned.sort_unstable();
    expected.sort_unstable();
    if returned != expected {
        return Err(CoreError::ExternalServiceError(format!(
            "classifier labels {:?} do not match candidates {:?}",
            classification.labels, candidates
        )));
    }

    if let Some(score) = classification
        .scores
        .iter()
        .find(|score| !(0.0..=1.0).contains(*score))
    {
        return Err(CoreError::ExternalServiceError(format!(
            "classifier score {} is outside [0, 1]",
            score
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_ignores_condition_order() {
        let text = "Ingredients: 200 g Linsen. Nutrition: 320 kcal.";
        let a = fingerprint(text, &["diabetes", "gout", "celiac disease"]);
        let b = fingerprint(text, &["gout", "celiac disease", "diabetes"]);
        let c = fingerprint(text, &["celiac disease", "diabetes", "gout"]);
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_any_element() {
        let base = fingerprint("lentil soup", &["diabetes", "gout"]);
        let variants = [
            fingerprint("lentil soup ", &["diabetes", "gout"]),
            fingerprint("lentil soup", &["diabetes", "gouty arthritis"]),
            fingerprint("lentil soup", &["diabetes"]),
            fingerprint("lentil soup", &["diabetes", "gout", "hypertension"]),
            fingerprint("lentil soup", &[] as &[&str]),
        ];
        for variant in &variants {
            assert_ne!(&base, variant);
        }
    }

    #[test]
    fn test_fingerprint_separators_are_not_ambiguous() {
        // Moving text into a condition must not collide.
        let a = fingerprint("soup;diabetes", &["gout"]);
        let b = fingerprint("soup", &["diabetes", "gout"]);
        let c = fingerprint("soup", &["diabetes,gout"]);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_join_conditions() {
        assert_eq!(join_conditions::<&str>(&[]), "");
        assert_eq!(join_conditions(&["diabetes"]), "diabetes");
        assert_eq!(join_conditions(&["diabetes", "gout"]), "diabetes and gout");
        assert_eq!(
            join_conditions(&["celiac disease", "diabetes", "gout"]),
            "celiac disease, diabetes, and gout"
        );
    }

    #[test]
    fn test_suitability_labels() {
        assert_eq!(
            suitability_labels("gout"),
            vec!["suitable for gout".to_string(), "not suitable for gout".to_string()]
        );
    }

    #[test]
    fn test_ensure_candidates_rejects_foreign_labels() {
        let candidates = suitability_labels("gout");
        let ok = Classification::new(
            vec![candidates[1].clone(), candidates[0].clone()],
            vec![0.7, 0.3],
        );
        assert!(ensure_candidates(&ok, &candidates).is_ok());

        let foreign = Classification::new(
            vec!["tasty".to_string(), candidates[0].clone()],
            vec![0.7, 0.3],
        );
        assert!(ensure_candidates(&foreign, &candidates).is_err());

        let ragged = Classification::new(candidates.clone(), vec![1.0]);
        assert!(ensure_candidates(&ragged, &candidates).is_err());

        let out_of_range = Classification::new(candidates.clone(), vec![1.2, -0.2]);
        assert!(ensure_candidates(&out_of_range, &candidates).is_err());
    }
}
