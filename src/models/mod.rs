pub mod fields;
pub mod impact;
pub mod report;
pub mod violation;

pub use fields::{ReportField, ReportFields};
pub use impact::Impact;
pub use report::{ConsolidatedReport, PerTestReport, PerTestReportInput};
pub use violation::{
    FilteredViolation, NodeSummary, PageEntry, ReportedViolation, ScanResults,
    StructuredViolation, ViolationRecord,
};
