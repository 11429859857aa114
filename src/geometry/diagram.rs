//! Zone boundary segments and label anchors for drawing each triangle.
//!
//! Boundaries are the classifier thresholds drawn as iso-percentage lines,
//! clipped to the region where the threshold actually separates two zones.
//! Degenerate boundaries (Triangle 5 CH4 = 40 inside C2H6 > 60) are omitted.

use serde::Serialize;

use super::{point_from_two, to_coordinate};
use crate::types::{FaultCode, Point, TriangleMethod};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Label {
    pub fault: FaultCode,
    pub position: Point,
    /// Zone fill colour
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Diagram {
    pub method: TriangleMethod,
    pub lines: Vec<LineSegment>,
    pub labels: Vec<Label>,
}

/// Boundary in (top, right, left) roles: each end fixes two of the three.
type Ends = [(Option<f64>, Option<f64>, Option<f64>); 2];

/// Build the drawing geometry for one triangle.
pub fn diagram(method: TriangleMethod) -> Diagram {
    let (bounds, anchors): (&[Ends], &[(FaultCode, [f64; 3])]) = match method {
        TriangleMethod::Triangle1 => (TRIANGLE_1_BOUNDS, TRIANGLE_1_LABELS),
        TriangleMethod::Triangle4 => (TRIANGLE_4_BOUNDS, TRIANGLE_4_LABELS),
        TriangleMethod::Triangle5 => (TRIANGLE_5_BOUNDS, TRIANGLE_5_LABELS),
    };

    let lines = bounds
        .iter()
        .filter_map(|[a, b]| {
            Some(LineSegment {
                start: point_from_two(a.0, a.1, a.2)?,
                end: point_from_two(b.0, b.1, b.2)?,
            })
        })
        .collect();

    let labels = anchors
        .iter()
        .map(|&(fault, [top, right, left])| Label {
            fault,
            position: to_coordinate(top, right, left),
            color: fault.color(),
        })
        .collect();

    Diagram {
        method,
        lines,
        labels,
    }
}

// Triangle 1: top CH4, right C2H4, left C2H2
const TRIANGLE_1_BOUNDS: &[Ends] = &[
    // C2H2 = 13: left edge to bottom edge
    [(None, Some(0.0), Some(13.0)), (Some(0.0), None, Some(13.0))],
    // C2H4 = 23: bottom edge to right edge
    [(Some(0.0), Some(23.0), None), (None, Some(23.0), Some(0.0))],
    // C2H4 = 9
    [(Some(0.0), Some(9.0), None), (None, Some(9.0), Some(0.0))],
    // CH4 = 75, above C2H4 = 23
    [(Some(75.0), Some(23.0), None), (Some(75.0), None, Some(0.0))],
    // CH4 = 85, above C2H4 = 9
    [(Some(85.0), Some(9.0), None), (Some(85.0), None, Some(0.0))],
];

const TRIANGLE_1_LABELS: &[(FaultCode, [f64; 3])] = &[
    (FaultCode::Pd, [90.0, 4.0, 6.0]),
    (FaultCode::T1, [88.0, 10.0, 2.0]),
    (FaultCode::T2, [54.0, 40.0, 6.0]),
    (FaultCode::T3, [80.0, 15.0, 5.0]),
    (FaultCode::D1, [65.0, 15.0, 20.0]),
    (FaultCode::D2, [40.0, 40.0, 20.0]),
    (FaultCode::Dt, [75.0, 5.0, 20.0]),
];

// Triangle 4: top H2, right CH4, left C2H6
const TRIANGLE_4_BOUNDS: &[Ends] = &[
    // H2 = 50: left edge to right edge
    [(Some(50.0), Some(0.0), None), (Some(50.0), None, Some(0.0))],
    // CH4 = 15: right edge down to C2H6 = 40
    [(None, Some(15.0), Some(0.0)), (None, Some(15.0), Some(40.0))],
    // C2H6 = 40: H2 = 50 down to bottom edge
    [(Some(50.0), None, Some(40.0)), (Some(0.0), None, Some(40.0))],
    // CH4 = 65: bottom edge to right edge
    [(Some(0.0), Some(65.0), None), (None, Some(65.0), Some(0.0))],
];

const TRIANGLE_4_LABELS: &[(FaultCode, [f64; 3])] = &[
    (FaultCode::Pd, [70.0, 20.0, 10.0]),
    (FaultCode::Nd, [85.0, 5.0, 10.0]),
    (FaultCode::S, [45.0, 5.0, 50.0]),
    (FaultCode::C, [30.0, 20.0, 50.0]),
    (FaultCode::Dt, [10.0, 80.0, 10.0]),
    (FaultCode::D2, [20.0, 50.0, 30.0]),
];

// Triangle 5: top CH4, right C2H4, left C2H6
const TRIANGLE_5_BOUNDS: &[Ends] = &[
    // C2H4 = 50: bottom edge to right edge
    [(None, Some(50.0), Some(50.0)), (None, Some(50.0), Some(0.0))],
    // CH4 = 20, right of C2H4 = 50
    [(Some(20.0), Some(50.0), None), (Some(20.0), None, Some(0.0))],
    // C2H6 = 60: left edge to bottom edge
    [(None, Some(0.0), Some(60.0)), (Some(0.0), None, Some(60.0))],
    // CH4 = 80: left edge to right edge
    [(None, Some(0.0), Some(20.0)), (Some(80.0), None, Some(0.0))],
];

// C has no reachable region under the rule set; its anchor marks the
// centre of the standard's diagram.
const TRIANGLE_5_LABELS: &[(FaultCode, [f64; 3])] = &[
    (FaultCode::T2, [30.0, 60.0, 10.0]),
    (FaultCode::T3, [10.0, 80.0, 10.0]),
    (FaultCode::S, [20.0, 10.0, 70.0]),
    (FaultCode::O, [90.0, 5.0, 5.0]),
    (FaultCode::Nd, [40.0, 30.0, 30.0]),
    (FaultCode::C, [30.0, 30.0, 40.0]),
];
