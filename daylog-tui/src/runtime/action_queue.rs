use crate::api::ApiError;
use crate::app::CompletionToggle;
use crate::calendar::CalendarDate;
use crate::types::DayRecord;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work requested by key handlers, run by the event loop after input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Action {
    ReloadDays,
    LoadDay { date: CalendarDate },
    SaveDay,
    ToggleCompletion { date: CalendarDate },
}

/// Result of a background request, applied to `App` on the UI loop.
#[derive(Debug)]
pub(super) enum Outcome {
    DaysLoaded {
        ticket: u64,
        result: Result<Vec<DayRecord>, ApiError>,
    },
    DayLoaded {
        date: CalendarDate,
        result: Result<Option<DayRecord>, ApiError>,
    },
    DaySaved {
        date: CalendarDate,
        result: Result<DayRecord, ApiError>,
    },
    CompletionSaved {
        toggle: CompletionToggle,
        result: Result<DayRecord, ApiError>,
    },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;
pub(super) type OutcomeTx = UnboundedSender<Outcome>;
pub(super) type OutcomeRx = UnboundedReceiver<Outcome>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}

pub(super) fn outcome_channel() -> (OutcomeTx, OutcomeRx) {
    mpsc::unbounded_channel()
}
