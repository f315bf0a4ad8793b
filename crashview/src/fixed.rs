/// Format a number with a fixed number of decimals, the way a browser's `toFixed` does.
///
/// Rust's formatter rounds an exact half to even; `toFixed` rounds it away from zero.
/// Only values that are exactly halfway differ, e.g. `12.25` or `1.125`, which are
/// common since the backend rounds timestamps to milliseconds.
pub fn to_fixed(value: f64, digits: usize) -> String {
	let rounded = format!("{value:.digits$}");

	match half(value.abs(), digits) {
		// Round the magnitude up, keeping the sign.
		Some(scaled) => {
			let sign = if value < 0.0 { "-" } else { "" };
			let up = scaled / 10 + 1;

			match digits {
				0 => format!("{sign}{up}"),
				_ => {
					let unit = 10u128.pow(digits as u32);
					format!("{sign}{}.{:0digits$}", up / unit, up % unit)
				}
			}
		}
		None => rounded,
	}
}

// If `value` is exactly halfway between two outputs, returns it scaled by 10^(digits + 1).
fn half(value: f64, digits: usize) -> Option<u128> {
	if !value.is_finite() {
		return None;
	}

	// Exact when the value has no more than `digits + 1` decimals.
	let extended = format!("{:.*}", digits + 1, value);
	if !extended.ends_with('5') {
		return None;
	}

	let scaled: u128 = extended.replace('.', "").parse().ok()?;

	// The decimal is only a binary fraction, and thus possibly `value` itself, if the fives cancel.
	if scaled % 5u128.checked_pow(digits as u32 + 1)? != 0 {
		return None;
	}

	match extended.parse::<f64>() {
		Ok(parsed) if parsed == value => Some(scaled),
		_ => None,
	}
}
