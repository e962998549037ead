use super::domain::{OpeningConfig, ScreeningSubmission, ScreeningVerdict};

/// Evaluate a screening submission against the opening's policy. Total over
/// its inputs; never fails.
///
/// An opening with no configured policy is not an error: the submission drops
/// to amber so a human reviews it.
pub fn evaluate(
    submission: &ScreeningSubmission,
    config: Option<&OpeningConfig>,
) -> ScreeningVerdict {
    let Some(config) = config else {
        return ScreeningVerdict::Amber;
    };

    if config.requires_relocation && submission.willing_to_relocate == Some(false) {
        return ScreeningVerdict::Red;
    }

    if let (Some(expected), Some(band_max)) = (
        submission.expected_salary_annual,
        config.salary_band_max_annual,
    ) {
        if expected > band_max {
            return ScreeningVerdict::Red;
        }
    }

    ScreeningVerdict::Green
}
