//! Application constants for column data loading and reporting.

// =============================================================================
// Input Format
// =============================================================================

/// Characters that may appear in a numeric literal, besides whitespace and
/// the user's delimiter.
pub const NUMERIC_CHARS: &str = "0123456789Ee-+.";

/// Delimiter assumed when none is given
pub const DEFAULT_DELIMITER: &str = ",";

/// Longest delimiter accepted
pub const DELIMITER_LEN_LIMIT: usize = 3;

/// Separator between a header's free-form prefix and its column names
pub const HEADER_ASSIGNMENT: char = '=';

/// Case-insensitive substring that marks a column as a timestep candidate
pub const TIMESTEP_MARKER: &str = "step";

// =============================================================================
// Output Formatting
// =============================================================================

/// Significant digits needed to round-trip an f64
pub const F64_ROUND_TRIP_DIGITS: usize = 17;

/// Width of the rules drawn around report sections
pub const REPORT_RULE_WIDTH: usize = 55;

/// Width of the rules under report subheadings
pub const SUBHEADING_RULE_WIDTH: usize = 30;

/// Column width used to align calculation names in reports
pub const CALC_NAME_WIDTH: usize = 22;

/// Header cell of result tables written to file
pub const RESULT_TABLE_CORNER: &str = "Calculations\\Columns";
