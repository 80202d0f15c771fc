use chrono::NaiveDateTime;

use crate::quantity::energy::KilowattHours;

/// Energy moved from one slot to another by the top-N peak shift.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Transfer {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub amount: KilowattHours,
}
