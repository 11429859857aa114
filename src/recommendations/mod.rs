//! Maintenance recommendation table
//!
//! One static entry per fault code, split into corrective actions (what to do
//! now) and preventive actions (what keeps the fault from coming back).
//! `resolve()` copies an entry into an owned `RecommendationRecord`.

use crate::types::{FaultCode, MaintenancePriority, RecommendationRecord};

struct Entry {
    code: FaultCode,
    description: &'static str,
    priority: MaintenancePriority,
    corrective: &'static [&'static str],
    preventive: &'static [&'static str],
    note: Option<&'static str>,
}

/// Look up the recommendation for a fault code.
///
/// Returns `None` for codes without a table entry; callers skip those.
pub fn resolve(code: FaultCode) -> Option<RecommendationRecord> {
    TABLE.iter().find(|e| e.code == code).map(|e| RecommendationRecord {
        fault_type: e.code,
        description: e.description.to_string(),
        corrective_actions: e.corrective.iter().map(|s| (*s).to_string()).collect(),
        preventive_actions: e.preventive.iter().map(|s| (*s).to_string()).collect(),
        priority: e.priority,
        note: e.note.map(str::to_string),
    })
}

/// Display description of a fault code.
pub fn description(code: FaultCode) -> &'static str {
    TABLE
        .iter()
        .find(|e| e.code == code)
        .map_or("Unknown fault", |e| e.description)
}

/// Maintenance priority of a fault code; unknown codes rank low.
pub fn priority(code: FaultCode) -> MaintenancePriority {
    TABLE
        .iter()
        .find(|e| e.code == code)
        .map_or(MaintenancePriority::Low, |e| e.priority)
}

static TABLE: &[Entry] = &[
    // ------------------------------------------------------------------
    // Triangle 1
    // ------------------------------------------------------------------
    Entry {
        code: FaultCode::Pd,
        description: "Partial Discharge",
        priority: MaintenancePriority::Medium,
        corrective: &[
            "Repair or replace cracked or damaged insulators; damaged insulation is where partial discharge starts",
            "Visually inspect gas voids and solid insulation for physical damage, corrosion or leaks",
            "Check insulating gas pressure for significant drops (2 bar)",
        ],
        preventive: &[
            "Measure PD periodically (every 6-12 months) with a standard PD detector",
            "Prefer non-invasive methods such as ultrasonic or TEV (Transient Earth Voltage)",
            "Keep the transformer and insulation space free of excess moisture (30-40 °C)",
            "Keep the operating temperature (60-65 °C) within safe limits",
        ],
        note: None,
    },
    Entry {
        code: FaultCode::D1,
        description: "Low Energy Discharge (light arcing)",
        priority: MaintenancePriority::High,
        corrective: &[
            "Clean insulators and bushings of dust, carbon and arcing residue",
            "Repair insulation showing degradation or light arcing marks",
            "Tighten all terminals, bolts and cable connections",
            "Recondition or replace the oil if quality stays poor after filtration",
        ],
        preventive: &[
            "Run DGA routinely, tracking CH4, C2H4 and C2H2",
            "Check temperature, oil leaks, tank cleanliness and busbar/bushing condition",
            "Keep the grounding system in good condition to suppress flashover",
            "Test oil breakdown voltage periodically",
        ],
        note: None,
    },
    Entry {
        code: FaultCode::D2,
        description: "High Energy Discharge (heavy arcing)",
        priority: MaintenancePriority::Urgent,
        corrective: &[
            "Perform a controlled shutdown and open the main cover for internal inspection",
            "Replace or recondition paper/oil insulation showing severe damage",
            "Repair loose or burnt terminals and connections",
            "Remove carbon, debris and metal particles left by arcing",
            "Replace the oil if it has turned dark from arcing decomposition",
        ],
        preventive: &[
            "Increase DGA frequency to every 2-4 months to catch C2H2 rises early",
            "Investigate immediately if D2 marker gases keep rising",
            "Use infrared thermography to find early hotspots",
            "Test breakdown voltage per IEC 60156",
            "Verify radiators, fans and oil circulation work correctly",
        ],
        note: None,
    },
    Entry {
        code: FaultCode::T1,
        description: "Thermal Fault < 300°C",
        priority: MaintenancePriority::Medium,
        corrective: &[
            "Inspect and clean terminals, bushings and connections for loose contacts",
            "Review transformer loading and avoid overload that raises operating temperature",
        ],
        preventive: &[
            "Monitor dissolved gases routinely with the Duval triangle method",
            "Keep operating temperature within limits, including cooling system checks",
            "Test breakdown voltage and filter the oil periodically",
            "Verify grounding and protection systems",
            "Increase test frequency and trend results so the fault does not escalate",
            "Schedule preventive maintenance covering DGA, visual inspection, insulation tests and cooling",
        ],
        note: None,
    },
    Entry {
        code: FaultCode::T2,
        description: "Thermal Fault 300-700°C",
        priority: MaintenancePriority::High,
        corrective: &[
            "Evaluate and optimize radiators, fans and oil circulation",
            "Tighten mechanical and electrical connections to remove hotspots from poor contacts",
            "Repair or replace insulation components damaged by heating",
            "Keep loading within design capacity",
        ],
        preventive: &[
            "Monitor dissolved gases periodically with the Duval triangle method",
            "Test oil quality including breakdown voltage, and filter or replace the oil",
            "Inspect terminals, busbars and connections for looseness, dirt or oxidation",
            "Verify grounding and protection systems",
            "Increase testing frequency if T2 gases trend upward",
        ],
        note: None,
    },
    Entry {
        code: FaultCode::T3,
        description: "Thermal Fault > 700°C",
        priority: MaintenancePriority::Urgent,
        corrective: &[
            "Perform a controlled shutdown as soon as possible",
            "Carry out a full internal inspection",
            "Replace or recondition internal insulation degraded by overheating",
            "Inspect and replace the insulating oil",
            "Repair connections and terminals damaged by excess heat",
        ],
        preventive: &[
            "Verify the cooling system works correctly",
            "Monitor DGA more intensively going forward",
            "Verify relay, Buchholz and pressure protection",
            "Review loading and plan replacement or upgrade if needed",
            "Document all maintenance actions, inspection results and DGA findings",
        ],
        note: None,
    },
    Entry {
        code: FaultCode::Dt,
        description: "Discharge With Thermal Component",
        priority: MaintenancePriority::Urgent,
        corrective: &[
            "Inspect solid insulation and oil thoroughly",
            "Repair or replace insulation where discharge with thermal damage is suspected",
            "Degas, filter or replace the oil to remove contaminants",
            "Reduce load where possible to avoid further heating",
        ],
        preventive: &[
            "Review load, oil temperature and winding temperature history for overload",
            "Check for sudden load surges or abnormal temperatures in recent periods",
            "Test oil comprehensively (tan delta, water content, acidity, contaminants)",
            "Improve cooling or add supplementary cooling",
            "Increase DGA monitoring to every 2-4 months",
        ],
        note: None,
    },
    // ------------------------------------------------------------------
    // Triangle 4
    // ------------------------------------------------------------------
    Entry {
        code: FaultCode::S,
        description: "Stray Gassing",
        priority: MaintenancePriority::Low,
        corrective: &[
            "Degas the oil if gas levels approach operating limits",
            "Filter the oil to slow ageing and reduce gas release",
        ],
        preventive: &[
            "Review load, oil temperature and winding temperature history",
            "Check for mild overload or high hotspot temperatures",
            "Inspect for mild thermal degradation, dirt or leaking seals",
            "Test tan delta and water content to detect oil ageing or oxidation",
            "Add local cooling if operating temperature is too high",
            "Monitor DGA every 3-6 months to confirm the gas pattern stays stable",
        ],
        note: None,
    },
    Entry {
        code: FaultCode::C,
        description: "Carbonization of paper",
        priority: MaintenancePriority::High,
        corrective: &[
            "Inspect and clean insulator surfaces, bushings and terminal connections",
            "Check and tighten electrical connections",
            "Test breakdown voltage and filter the oil",
        ],
        preventive: &[
            "Monitor DGA routinely with the Duval triangle method",
            "Protect the surroundings from pollutants and high humidity",
            "Run scheduled preventive maintenance at 3-6 month intervals",
            "Monitor more often if results trend toward partial discharge",
        ],
        note: None,
    },
    Entry {
        code: FaultCode::Nd,
        description: "Normal Degradation",
        priority: MaintenancePriority::Medium,
        corrective: &["Resample periodically to track dissolved gas development"],
        preventive: &[
            "Monitor general transformer condition routinely",
            "Follow the normal preventive maintenance schedule",
        ],
        note: Some(
            "Resampling interval follows the CO level: LOW 4-8 months, MEDIUM 2-4 months, HIGH 1-2 months",
        ),
    },
    // ------------------------------------------------------------------
    // Triangle 5
    // ------------------------------------------------------------------
    Entry {
        code: FaultCode::O,
        description: "Overheating < 250°C",
        priority: MaintenancePriority::Medium,
        corrective: &[
            "Check the cooling and ventilation systems",
            "Inspect electrical connections and contacts",
        ],
        preventive: &[
            "Monitor operating temperature continuously",
            "Review operating load and heat distribution",
            "Monitor DGA periodically to detect temperature rise early",
        ],
        note: None,
    },
    // ------------------------------------------------------------------
    // Normal
    // ------------------------------------------------------------------
    Entry {
        code: FaultCode::Normal,
        description: "Normal condition",
        priority: MaintenancePriority::Low,
        corrective: &["Resample periodically to track dissolved gas development"],
        preventive: &[
            "Run routine DGA on the standard schedule",
            "Perform periodic preventive maintenance",
            "Record normal readings for trend analysis",
        ],
        note: None,
    },
];
