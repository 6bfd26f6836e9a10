//! Scoring - points for cleared rows.

use crate::types::POINTS_PER_ROW;

/// Score awarded for clearing `rows` rows in one lock
///
/// ```
/// use blockfall_core::calculate_score;
///
/// assert_eq!(calculate_score(0), 0);
/// assert_eq!(calculate_score(2), 200);
/// ```
pub fn calculate_score(rows: u32) -> u32 {
    rows * POINTS_PER_ROW
}
