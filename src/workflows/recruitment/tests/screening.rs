use super::common::{opening, submission};
use crate::workflows::recruitment::domain::ScreeningVerdict;
use crate::workflows::recruitment::screening::evaluate;

#[test]
fn missing_opening_policy_forces_amber() {
    assert_eq!(evaluate(&submission(), None), ScreeningVerdict::Amber);

    // Even a submission that would fail every knob stays amber without a policy.
    let mut declined = submission();
    declined.willing_to_relocate = Some(false);
    declined.expected_salary_annual = Some(500_000);
    assert_eq!(evaluate(&declined, None), ScreeningVerdict::Amber);
}

#[test]
fn declined_relocation_against_requirement_is_red() {
    let mut declined = submission();
    declined.willing_to_relocate = Some(false);
    assert_eq!(evaluate(&declined, Some(&opening())), ScreeningVerdict::Red);
}

#[test]
fn unanswered_relocation_is_not_a_decline() {
    let mut unanswered = submission();
    unanswered.willing_to_relocate = None;
    assert_eq!(
        evaluate(&unanswered, Some(&opening())),
        ScreeningVerdict::Green
    );
}

#[test]
fn salary_above_band_maximum_is_red() {
    let mut expensive = submission();
    expensive.expected_salary_annual = Some(120_000);
    assert_eq!(evaluate(&expensive, Some(&opening())), ScreeningVerdict::Red);
}

#[test]
fn conforming_submission_is_green() {
    assert_eq!(evaluate(&submission(), Some(&opening())), ScreeningVerdict::Green);

    let mut no_band = opening();
    no_band.salary_band_max_annual = None;
    let mut expensive = submission();
    expensive.expected_salary_annual = Some(500_000);
    assert_eq!(evaluate(&expensive, Some(&no_band)), ScreeningVerdict::Green);
}
