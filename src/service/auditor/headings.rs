use crate::domain::models::HeadingStructure;

use super::types::HeadingAuditResult;

pub struct HeadingStructureChecker;

impl HeadingStructureChecker {
    /// h1 presence plus h2/h3 counts. Malformed heading lists were already
    /// emptied when the page record was loaded, so this never fails.
    pub fn evaluate(headings: &HeadingStructure) -> HeadingAuditResult {
        HeadingAuditResult {
            h1_present: !headings.h1.trim().is_empty(),
            h2_count: headings.h2.len(),
            h3_count: headings.h3.len(),
        }
    }
}
