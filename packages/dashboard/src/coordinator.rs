//! Turns hover and click events from any view into highlight changes.
//!
//! Views report the raw district code under the pointer. The coordinator
//! normalizes it and updates the one highlight value in the selection;
//! the dashboard then re-renders every view from that value. Clicks pin
//! the highlight; hovers only preview it while nothing is pinned.

use school_map_dashboard_models::ViewKind;
use school_map_district_models::DistrictCode;
use school_map_selection::{Change, SelectionState};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Pointer interaction reported by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    /// Pins the highlight on the district, or clears it if already pinned
    /// there.
    Click,
    /// Previews the district unless a highlight is pinned.
    Hover,
    /// Ends the preview of the district unless a highlight is pinned.
    Leave,
}

/// A highlight event from one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEvent {
    /// View the event came from.
    pub source: ViewKind,
    /// What happened.
    pub kind: EventKind,
    /// District code as the view knows it, possibly unpadded.
    pub raw_code: String,
}

impl ViewEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(source: ViewKind, kind: EventKind, raw_code: impl Into<String>) -> Self {
        Self {
            source,
            kind,
            raw_code: raw_code.into(),
        }
    }

    /// A click on `raw_code` in `source`.
    #[must_use]
    pub fn click(source: ViewKind, raw_code: impl Into<String>) -> Self {
        Self::new(source, EventKind::Click, raw_code)
    }

    /// The pointer entering `raw_code` in `source`.
    #[must_use]
    pub fn hover(source: ViewKind, raw_code: impl Into<String>) -> Self {
        Self::new(source, EventKind::Hover, raw_code)
    }

    /// The pointer leaving `raw_code` in `source`.
    #[must_use]
    pub fn leave(source: ViewKind, raw_code: impl Into<String>) -> Self {
        Self::new(source, EventKind::Leave, raw_code)
    }
}

/// Applies `event` to the highlight in `selection`.
///
/// Returns the change made, or `None` when the event changes nothing and
/// no re-render is needed. Codes that do not normalize are dropped with a
/// warning: they come from data, not from configuration.
pub fn apply_event(selection: &mut SelectionState, event: &ViewEvent) -> Option<Change> {
    let code = match DistrictCode::parse(&event.raw_code) {
        Ok(code) => code,
        Err(e) => {
            log::warn!("Dropping {} {} event: {e}", event.source, event.kind);
            return None;
        }
    };

    log::debug!("{} {} on {code}", event.source, event.kind);

    match event.kind {
        EventKind::Click => Some(selection.toggle_highlight(code)),
        EventKind::Hover => selection.preview_highlight(code),
        EventKind::Leave => selection.end_preview(&code),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use school_map_district_models::RawRecord;
    use school_map_ingest::Dataset;
    use school_map_metrics::MetricCatalog;

    use super::*;

    fn selection() -> SelectionState {
        let records = ["1", "2"]
            .into_iter()
            .map(|code| RawRecord {
                code: code.to_owned(),
                name: format!("District {code}"),
                year: 2021,
                values: BTreeMap::new(),
            })
            .collect();
        let dataset = Dataset::new(records).unwrap();
        SelectionState::from_dataset(Rc::new(MetricCatalog::builtin()), &dataset)
    }

    fn code(raw: &str) -> DistrictCode {
        DistrictCode::parse(raw).unwrap()
    }

    #[test]
    fn click_toggles() {
        let mut selection = selection();
        let click = ViewEvent::click(ViewKind::Map, "350000");

        assert_eq!(apply_event(&mut selection, &click), Some(Change::Highlight));
        assert_eq!(selection.highlighted(), Some(&code("00350000")));

        assert_eq!(apply_event(&mut selection, &click), Some(Change::Highlight));
        assert_eq!(selection.highlighted(), None);
    }

    #[test]
    fn click_from_another_view_moves_highlight() {
        let mut selection = selection();
        apply_event(&mut selection, &ViewEvent::click(ViewKind::Map, "1"));
        apply_event(&mut selection, &ViewEvent::click(ViewKind::Scatter, "00000002"));
        assert_eq!(selection.highlighted(), Some(&code("2")));
    }

    #[test]
    fn padded_and_unpadded_codes_toggle_the_same_district() {
        let mut selection = selection();
        apply_event(&mut selection, &ViewEvent::click(ViewKind::Map, "1"));
        apply_event(&mut selection, &ViewEvent::click(ViewKind::Trend, "00000001"));
        assert_eq!(selection.highlighted(), None);
    }

    #[test]
    fn hover_then_leave() {
        let mut selection = selection();

        let hover = ViewEvent::hover(ViewKind::Scatter, "2");
        assert_eq!(apply_event(&mut selection, &hover), Some(Change::Highlight));
        assert_eq!(apply_event(&mut selection, &hover), None);

        let leave_other = ViewEvent::leave(ViewKind::Scatter, "1");
        assert_eq!(apply_event(&mut selection, &leave_other), None);
        assert_eq!(selection.highlighted(), Some(&code("2")));

        let leave = ViewEvent::leave(ViewKind::Scatter, "2");
        assert_eq!(apply_event(&mut selection, &leave), Some(Change::Highlight));
        assert_eq!(selection.highlighted(), None);
    }

    #[test]
    fn click_while_hovering_keeps_highlight_after_leave() {
        let mut selection = selection();

        apply_event(&mut selection, &ViewEvent::hover(ViewKind::Map, "1"));
        let click = ViewEvent::click(ViewKind::Map, "1");
        assert_eq!(apply_event(&mut selection, &click), Some(Change::Highlight));
        assert_eq!(selection.highlighted(), Some(&code("1")));

        let leave = ViewEvent::leave(ViewKind::Map, "1");
        assert_eq!(apply_event(&mut selection, &leave), None);
        assert_eq!(selection.highlighted(), Some(&code("1")));

        assert_eq!(apply_event(&mut selection, &click), Some(Change::Highlight));
        assert_eq!(selection.highlighted(), None);
    }

    #[test]
    fn hover_is_ignored_while_a_click_highlight_exists() {
        let mut selection = selection();
        apply_event(&mut selection, &ViewEvent::click(ViewKind::Scatter, "1"));

        let hover = ViewEvent::hover(ViewKind::Map, "2");
        assert_eq!(apply_event(&mut selection, &hover), None);
        let leave = ViewEvent::leave(ViewKind::Map, "2");
        assert_eq!(apply_event(&mut selection, &leave), None);
        assert_eq!(selection.highlighted(), Some(&code("1")));
    }

    #[test]
    fn malformed_code_is_dropped() {
        let mut selection = selection();
        apply_event(&mut selection, &ViewEvent::click(ViewKind::Map, "1"));

        for raw in ["", "   ", "ABC", "123456789"] {
            let event = ViewEvent::click(ViewKind::Map, raw);
            assert_eq!(apply_event(&mut selection, &event), None);
        }
        assert_eq!(selection.highlighted(), Some(&code("1")));
    }
}
