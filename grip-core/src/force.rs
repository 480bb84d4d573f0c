/// Maps a raw force reading to the number of LEDs to light.
///
/// Linear, rounded down, clamped to `[0, led_count]`. Out-of-range readings
/// (negative or above `max_raw`) saturate instead of failing.
pub fn map_force_to_leds(raw: i64, max_raw: i64, led_count: usize) -> usize {
    if raw <= 0 {
        return 0;
    }
    if max_raw <= 0 || raw >= max_raw {
        return led_count;
    }
    let lit = (raw as i128 * led_count as i128) / max_raw as i128;
    (lit as usize).min(led_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_points() {
        assert_eq!(map_force_to_leds(65535, 65535, 10), 10);
        assert_eq!(map_force_to_leds(0, 65535, 10), 0);
        assert_eq!(map_force_to_leds(32768, 65535, 10), 5);
        assert_eq!(map_force_to_leds(6553, 65535, 10), 0);
        assert_eq!(map_force_to_leds(6554, 65535, 10), 1);
    }

    #[test]
    fn out_of_range_inputs_saturate() {
        assert_eq!(map_force_to_leds(-1, 65535, 10), 0);
        assert_eq!(map_force_to_leds(i64::MIN, 65535, 10), 0);
        assert_eq!(map_force_to_leds(70_000, 65535, 10), 10);
        assert_eq!(map_force_to_leds(i64::MAX, 65535, 10), 10);
    }

    #[test]
    fn monotonic_and_bounded() {
        for led_count in [1usize, 7, 10, 16] {
            let mut previous = 0;
            for raw in (-500i64..=66_000).step_by(37) {
                let lit = map_force_to_leds(raw, 65535, led_count);
                assert!(lit >= previous, "dropped at raw={raw}");
                assert!(lit <= led_count);
                previous = lit;
            }
            assert_eq!(map_force_to_leds(65535, 65535, led_count), led_count);
        }
    }

    #[test]
    fn zero_leds_always_zero() {
        assert_eq!(map_force_to_leds(40_000, 65535, 0), 0);
    }
}
