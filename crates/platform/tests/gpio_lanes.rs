//! `GpioLanes` against mocked `embedded-hal` pins.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
use embedded_hal_mock::eh1::MockError;
use platform::{GpioLanes, Lane, LaneInput};

fn pins(levels: [&[PinState]; 4]) -> [PinMock; 4] {
    levels.map(|states| {
        let txns: Vec<PinTransaction> = states.iter().map(|s| PinTransaction::get(*s)).collect();
        PinMock::new(&txns)
    })
}

#[test]
fn high_line_reads_pressed() {
    let mut lanes = GpioLanes::new(pins([
        &[PinState::Low],
        &[PinState::High],
        &[],
        &[],
    ]));

    assert!(!lanes.read_raw(Lane::try_new(0).unwrap()).unwrap());
    assert!(lanes.read_raw(Lane::try_new(1).unwrap()).unwrap());

    for mut pin in lanes.release() {
        pin.done();
    }
}

#[test]
fn each_lane_reads_its_own_pin() {
    let mut lanes = GpioLanes::new(pins([
        &[PinState::Low, PinState::Low],
        &[PinState::Low, PinState::Low],
        &[PinState::Low, PinState::High],
        &[PinState::Low, PinState::Low],
    ]));

    let first: Vec<bool> = Lane::ALL.iter().map(|l| lanes.read_raw(*l).unwrap()).collect();
    let second: Vec<bool> = Lane::ALL.iter().map(|l| lanes.read_raw(*l).unwrap()).collect();
    assert_eq!(first, [false; 4]);
    assert_eq!(second, [false, false, true, false]);

    for mut pin in lanes.release() {
        pin.done();
    }
}

#[test]
fn pin_error_is_propagated() {
    use std::io::ErrorKind;

    let failing = [PinTransaction::get(PinState::High)
        .with_error(MockError::Io(ErrorKind::NotConnected))];
    let mut lanes = GpioLanes::new([
        PinMock::new(&[]),
        PinMock::new(&[]),
        PinMock::new(&[]),
        PinMock::new(&failing),
    ]);

    assert!(lanes.read_raw(Lane::try_new(3).unwrap()).is_err());

    for mut pin in lanes.release() {
        pin.done();
    }
}
