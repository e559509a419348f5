use serde::Serialize;

use crate::calendar::CalendarDate;

/// Body of `POST /api/days`. Server-owned fields (`id`, `updated_at`) are
/// never sent.
#[derive(Debug, Serialize)]
pub struct CreateDayRequest<'a> {
    pub date: CalendarDate,
    pub content: &'a str,
    pub completed: bool,
}
