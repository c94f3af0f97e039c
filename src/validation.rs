//! Input validation for rotations.
//!
//! Checks the structural integrity of a roster and its constraints before
//! matching. Detects:
//! - Duplicate participant IDs
//! - Malformed identifiers
//! - Together pairs naming the same participant twice
//! - Participants bound to more than one together pair
//! - Constraints naming participants that are not in the roster
//!
//! The last category is not fatal: such constraints simply do not apply.

use crate::models::{validate_identifier, ConstraintSet, RosterHistory};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two roster entries share the same ID.
    DuplicateId,
    /// An identifier is empty, contains whitespace, or is a record token.
    InvalidIdentifier,
    /// A together pair names one participant twice.
    SelfPair,
    /// A participant belongs to two together pairs.
    ConflictingPairs,
    /// A constraint names a participant who is not in the roster.
    UnknownParticipant,
}

impl ValidationErrorKind {
    /// Whether the rotation cannot be generated with this problem present.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnknownParticipant)
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster and its constraints.
///
/// Checks:
/// 1. No duplicate roster IDs
/// 2. Every roster ID is a valid identifier
/// 3. No together pair names the same participant twice
/// 4. No participant is in two together pairs
/// 5. Priority and together participants are in the roster
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(roster: &RosterHistory, constraints: &ConstraintSet) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for name in roster.names() {
        if !ids.insert(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate participant ID: {name}"),
            ));
        }
        if validate_identifier(name).is_err() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidIdentifier,
                format!("Invalid participant ID: {name:?}"),
            ));
        }
    }

    let mut paired = HashSet::new();
    for (a, b) in constraints.fixed_together() {
        if a == b {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfPair,
                format!("Together pair names '{a}' twice"),
            ));
            continue;
        }
        for member in [a, b] {
            if !paired.insert(member.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ConflictingPairs,
                    format!("'{member}' belongs to more than one together pair"),
                ));
            }
            if !ids.contains(member.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownParticipant,
                    format!("Together pair ({a}, {b}) references unknown participant '{member}'"),
                ));
            }
        }
    }

    for id in constraints.priority() {
        if !ids.contains(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownParticipant,
                format!("Priority constraint references unknown participant '{id}'"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pairing;

    fn sample_roster() -> RosterHistory {
        RosterHistory::new(
            vec!["Ann".into(), "Bo".into(), "Cy".into(), "Di".into()],
            vec![Pairing::of("Ann", "Bo")],
        )
        .unwrap()
    }

    #[test]
    fn test_valid_input() {
        let mut cs = ConstraintSet::new();
        cs.add_fixed_together(&["Cy", "Di"]).unwrap();
        cs.add_leaving_soon("Ann").unwrap();
        assert!(validate_input(&sample_roster(), &cs).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        // Deserialized rosters bypass the constructor's checks.
        let roster: RosterHistory =
            serde_json::from_str(r#"{"names":["Ann","Ann"],"history":[]}"#).unwrap();
        let errors = validate_input(&roster, &ConstraintSet::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_invalid_identifier() {
        let roster: RosterHistory =
            serde_json::from_str(r#"{"names":["Ann Sofie"],"history":[]}"#).unwrap();
        let errors = validate_input(&roster, &ConstraintSet::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidIdentifier));
    }

    #[test]
    fn test_conflicting_pairs() {
        let cs: ConstraintSet = serde_json::from_str(
            r#"{"leaving_soon":[],"just_arrived":[],
                "together":[["Ann","Bo"],["Bo","Cy"],["Di","Di"]],
                "blackout_dates":[]}"#,
        )
        .unwrap();
        let errors = validate_input(&sample_roster(), &cs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ConflictingPairs));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SelfPair));
        assert!(errors.iter().all(|e| e.kind.is_fatal()));
    }

    #[test]
    fn test_unknown_participant_not_fatal() {
        let mut cs = ConstraintSet::new();
        cs.add_just_arrived("Zed").unwrap();
        cs.add_fixed_together(&["Ann", "Yu"]).unwrap();
        let errors = validate_input(&sample_roster(), &cs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| !e.kind.is_fatal()));
    }
}
