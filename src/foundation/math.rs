pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Values this close to 0 or 1 are snapped onto the bound.
pub(crate) const UNIT_SNAP_EPS: f64 = 1e-9;

/// Clamp to `[0, 1]`, snapping values within [`UNIT_SNAP_EPS`] of a bound.
pub(crate) fn clamp_unit_snapped(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    let x = x.clamp(0.0, 1.0);
    if x < UNIT_SNAP_EPS {
        0.0
    } else if 1.0 - x < UNIT_SNAP_EPS {
        1.0
    } else {
        x
    }
}
