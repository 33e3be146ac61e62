//! Tokens and slot labels handed out with an assignment.

use chrono::NaiveDateTime;
use parkr_common::parking::lot::{Lot, LotId};

pub const TOKEN_PREFIX: &str = "PKG";
const TOKEN_TIME_FORMAT: &str = "%Y%m%d%H%M%S";
const PLATE_SUFFIX_LEN: usize = 4;

const SLOTS_PER_ROW: u32 = 10;
const ROWS: u32 = 26;

/// `PKG{lot}{last 4 of plate}{YYYYmmddHHMMSS}`.
///
/// Two assignments in the same lot, in the same second, for plates sharing
/// their last four characters produce the same token; see [`dedupe_token`].
pub fn token(lot_id: LotId, plate: &str, at: NaiveDateTime) -> String {
    format!(
        "{TOKEN_PREFIX}{lot_id}{}{}",
        plate_suffix(plate),
        at.format(TOKEN_TIME_FORMAT)
    )
}

fn plate_suffix(plate: &str) -> String {
    let upper: Vec<char> = plate.to_uppercase().chars().collect();
    let start = upper.len().saturating_sub(PLATE_SUFFIX_LEN);
    upper[start..].iter().collect()
}

/// Appends `-2`, `-3`, ... until `in_use` no longer matches.
pub(crate) fn dedupe_token(token: String, in_use: impl Fn(&str) -> bool) -> String {
    let mut candidate = token.clone();
    let mut n: u32 = 2;
    while in_use(&candidate) {
        candidate = format!("{token}-{n}");
        n += 1;
    }
    candidate
}

/// Label of the slot about to be filled, `{lot}-{row letter}{1..10}`.
///
/// Derived from the occupied count before the reservation, so it repeats
/// every 260 slots.
pub fn slot_label(lot: &Lot) -> String {
    let index = lot.occupied_slots();
    let row = (index / SLOTS_PER_ROW) % ROWS;
    let letter = char::from(b'A' + row as u8);
    let number = index % SLOTS_PER_ROW + 1;
    format!("{}-{letter}{number}", lot.id)
}
