/// Goal collection and validation
///
/// Accepts the free-text goal the user types, trims it, and validates it
/// before the workflow is allowed to advance. The validated text is
/// wrapped in a [`Goal`] so the rest of the app never sees raw input.

use std::fmt;

use crate::error::GoalError;

/// Minimum length of a trimmed goal, in characters
pub const GOAL_MIN_LEN: usize = 10;

/// Input ceiling for a goal, in characters (longer input is rejected)
pub const GOAL_MAX_LEN: usize = 500;

/// Example goals offered as pre-fill affordances in the UI.
/// These are not part of the validation contract.
pub const EXAMPLE_GOALS: [&str; 5] = [
    "Running a successful tech startup as CEO",
    "Graduating from medical school and becoming a doctor",
    "Publishing my first bestselling novel",
    "Winning an Olympic gold medal in swimming",
    "Opening my own restaurant and earning a Michelin star",
];

/// A validated, trimmed, non-empty goal description
///
/// Invariant: 10-500 characters after trimming, never whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal(String);

impl Goal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate free text and turn it into a [`Goal`]
///
/// Trims whitespace first. Emptiness is checked before the length test
/// so the user gets the right message for a blank submission. Text over
/// the 500 character ceiling is rejected rather than truncated.
pub fn submit(text: &str) -> Result<Goal, GoalError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(GoalError::Empty);
    }

    let length = trimmed.chars().count();

    if length < GOAL_MIN_LEN {
        return Err(GoalError::TooShort { min: GOAL_MIN_LEN });
    }

    if length > GOAL_MAX_LEN {
        return Err(GoalError::TooLong { max: GOAL_MAX_LEN });
    }

    Ok(Goal(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(submit(""), Err(GoalError::Empty));
        assert_eq!(submit("   \t\n  "), Err(GoalError::Empty));
    }

    #[test]
    fn test_short_input_rejected() {
        assert_eq!(submit("ab"), Err(GoalError::TooShort { min: GOAL_MIN_LEN }));
        // Trimming happens before the length check
        assert_eq!(
            submit("  hi  "),
            Err(GoalError::TooShort { min: GOAL_MIN_LEN })
        );
        // Nine characters is still one short
        assert_eq!(
            submit("123456789"),
            Err(GoalError::TooShort { min: GOAL_MIN_LEN })
        );
    }

    #[test]
    fn test_long_input_rejected() {
        let too_long = "a".repeat(GOAL_MAX_LEN + 1);
        assert_eq!(
            submit(&too_long),
            Err(GoalError::TooLong { max: GOAL_MAX_LEN })
        );

        // Exactly at the ceiling is fine
        let at_limit = "a".repeat(GOAL_MAX_LEN);
        assert!(submit(&at_limit).is_ok());
    }

    #[test]
    fn test_valid_goal_is_trimmed() {
        let goal = submit("  Running my own bakery  ").unwrap();
        assert_eq!(goal.as_str(), "Running my own bakery");
    }

    #[test]
    fn test_example_goals_all_pass_validation() {
        for example in EXAMPLE_GOALS {
            assert!(submit(example).is_ok(), "example rejected: {example}");
        }
    }

    #[test]
    fn test_medical_school_goal_accepted() {
        let goal = submit("Graduating from medical school").unwrap();
        assert_eq!(goal.as_str(), "Graduating from medical school");
    }
}
