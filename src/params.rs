// src/params.rs
//
// Source-page shape constants. All of these mirror the markup of the
// game8 card list; if the page layout drifts, this is the file to touch.

/// Class on the wrapper div around the card table.
pub const TABLE_WRAPPER_CLASS: &str = "scroll--table";

/// Data rows carry at least this many cells; shorter rows are headers
/// or spacers and get skipped.
pub const MIN_DATA_CELLS: usize = 10;

/// Alt-text prefix on every type/energy image.
pub const TYPE_LABEL_PREFIX: &str = "Pokemon TCG Pocket - ";

/// Class on the span that flags an ability title.
pub const ABILITY_MARKER_CLASS: &str = "a-red";

/// Class on the div blocks anchoring attacks and the retreat row.
pub const ALIGN_CLASS: &str = "align";

/// Bold label of the retreat row; never an attack name.
pub const RETREAT_LABEL: &str = "Retreat Cost";

/// Retreat images render one energy per 20px of width.
pub const RETREAT_WIDTH_UNIT: u32 = 20;

/// Stage label of cards with no evolution prerequisite.
pub const BASIC_STAGE: &str = "Basic";

/// Types stored as raw-text trainer records instead of full Pokemon records.
pub const TRAINER_TYPES: [&str; 3] = ["Supporter", "Item", "Pokemon Tool"];
