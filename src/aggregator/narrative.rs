//! Overall recommendation text
//!
//! Only the highest-priority template among the detected codes is emitted.

use crate::types::FaultCode;

/// Templates in priority order; first code present wins.
const TEMPLATES: &[(FaultCode, &str)] = &[
    (
        FaultCode::D2,
        "CRITICAL: High Energy Discharge (D2) detected. Shut down immediately and perform an internal inspection of the transformer.",
    ),
    (
        FaultCode::T3,
        "CRITICAL: Thermal Fault >700°C (T3) detected. Shut down immediately and carry out comprehensive repair.",
    ),
    (
        FaultCode::D1,
        "HIGH: Low Energy Discharge (D1) detected. Perform an in-depth inspection and repair the insulation.",
    ),
    (
        FaultCode::T2,
        "HIGH: Thermal Fault 300-700°C (T2) detected. Check the cooling system and operating load.",
    ),
    (
        FaultCode::T1,
        "MEDIUM: Thermal Fault <300°C (T1) detected. Increase monitoring and check for hotspots.",
    ),
    (
        FaultCode::Pd,
        "MEDIUM: Partial Discharge (PD) detected. Perform PD measurement and check the insulation.",
    ),
];

pub const NO_FAULT: &str =
    "No fault indication detected. Continue routine DGA monitoring on schedule.";

pub const MINOR_FAULT: &str =
    "Minor fault indications detected. Increase DGA monitoring frequency.";

pub const MANUAL_COMPLETE: &str =
    "Manual analysis complete. Follow up according to the detected faults.";

/// Narrative for computed analyses.
pub fn computed(codes: &[FaultCode]) -> &'static str {
    if codes.is_empty() {
        return NO_FAULT;
    }
    template(codes).unwrap_or(MINOR_FAULT)
}

/// Narrative for operator-confirmed analyses.
pub fn manual(codes: &[FaultCode]) -> &'static str {
    template(codes).unwrap_or(MANUAL_COMPLETE)
}

fn template(codes: &[FaultCode]) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(code, _)| codes.contains(code))
        .map(|(_, text)| *text)
}
