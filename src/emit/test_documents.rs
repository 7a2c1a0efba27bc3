use chrono::{DateTime, TimeZone, Utc};

use crate::export::document::{ExportDocument, build_export_document_at};
use crate::export::settings::{ExportSettings, GroupBy};
use crate::model::fixtures::{sample_forest, small_forest};
use crate::selection::NodeRef;
use crate::selection::engine::apply_toggles;

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Plan `tp-1` of the small forest exported with default settings.
pub fn plan_document() -> ExportDocument {
    let forest = small_forest();
    let selection = apply_toggles(&forest, &[NodeRef::plan("tp-1")]);
    build_export_document_at(&selection, &ExportSettings::default(), &forest, fixed_time())
}

/// Suite `ts-2` (and nested `ts-3`) grouped by priority: "Prioridad 2" first.
pub fn grouped_document() -> ExportDocument {
    let forest = sample_forest();
    let selection = apply_toggles(&forest, &[NodeRef::suite("ts-2")]);
    let settings = ExportSettings::default().with_group_by(GroupBy::Priority);
    build_export_document_at(&selection, &settings, &forest, fixed_time())
}
