//! Type system enforcement tests for the board's domain newtypes.
//! These newtypes keep lane indices and display values in range by construction.

// ── Lane ─────────────────────────────────────────────────────────────────────

#[test]
fn lane_try_new_accepts_all_lanes() {
    use platform::{Lane, LANE_COUNT};
    for value in 0..LANE_COUNT {
        let value = u8::try_from(value).unwrap_or(u8::MAX);
        assert!(Lane::try_new(value).is_ok(), "lane {value} should be valid");
    }
}

#[test]
fn lane_try_new_rejects_past_last_lane() {
    use platform::Lane;
    assert!(Lane::try_new(4).is_err());
    assert!(Lane::try_new(255).is_err());
}

#[test]
fn lane_error_reports_bounds() {
    use platform::{Lane, OutOfRangeError};
    assert_eq!(
        Lane::try_new(9),
        Err(OutOfRangeError {
            value: 9,
            min: 0,
            max: 3
        })
    );
}

#[test]
fn lane_is_one_byte() {
    use platform::Lane;
    assert_eq!(core::mem::size_of::<Lane>(), 1);
}

// ── RowMask ──────────────────────────────────────────────────────────────────

#[test]
fn row_mask_never_exceeds_two_rows() {
    use platform::RowMask;
    for pos in -3..=12 {
        if let Some(mask) = RowMask::for_position(pos) {
            assert!(mask.bits().count_ones() <= 2, "position {pos}");
        }
    }
}

#[test]
fn row_mask_visible_range_is_zero_to_eight() {
    use platform::RowMask;
    let visible: Vec<i32> = (-3..=12)
        .filter(|p| RowMask::for_position(*p).is_some())
        .collect();
    assert_eq!(visible, (0..=8).collect::<Vec<_>>());
}

// ── DisplayScore ─────────────────────────────────────────────────────────────

#[test]
fn display_score_keeps_low_four_digits() {
    use platform::DisplayScore;
    assert_eq!(DisplayScore::from_score(9_999).get(), 9_999);
    assert_eq!(DisplayScore::from_score(123_456).get(), 3_456);
}

#[test]
fn display_score_is_two_bytes() {
    use platform::DisplayScore;
    assert_eq!(core::mem::size_of::<DisplayScore>(), 2);
}

// ── Tone ─────────────────────────────────────────────────────────────────────

#[test]
fn tone_default_is_rest() {
    use platform::Tone;
    assert_eq!(Tone::default(), Tone::Rest);
}
