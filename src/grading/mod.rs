//! Grade classification and GPA aggregation.
//!
//! Encodes the institution's grading policy: numeric grades carry GPA
//! weight, `Pass` and `Exemption with points` award credit without
//! affecting the average, and the remaining exemption variants award
//! nothing.

pub mod aggregate;
pub mod classify;
pub mod types;
