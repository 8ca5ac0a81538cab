use rsc_types::Document3X;

use crate::status::StepReport;

/// 3.2 → 3.3 only bumps the version; the shape is identical.
pub fn migrate_v3_2_to_v3_3(doc: Document3X) -> (Document3X, StepReport) {
    (doc, StepReport::unchanged())
}
