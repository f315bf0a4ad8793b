use std::fmt;

use crate::to_fixed;

/// The modal raised when the backend reports an accident.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
	pub confidence: f64,
	pub accident_time: Option<f64>,
	pub accident_type: String,
	pub severity: String,
}

impl Alert {
	pub const TITLE: &'static str = "Accident Detected";
	pub const MESSAGE: &'static str = "The AI model has detected a potential road accident in the current footage.";

	/// The detail lines under the message; unknown values are left out.
	pub fn details(&self) -> Vec<String> {
		let mut details = Vec::new();

		if let Some(time) = self.accident_time {
			details.push(format!("Time: {}s", to_fixed(time, 2)));
		}

		if is_known(&self.accident_type) {
			details.push(format!("Type: {}", self.accident_type));
		}

		if is_known(&self.severity) {
			details.push(format!("Severity: {}", self.severity));
		}

		details.push(format!("Confidence: {}%", to_fixed(self.confidence * 100.0, 1)));
		details
	}
}

// The backend says "None" rather than omitting the field.
pub(super) fn is_known(value: &str) -> bool {
	!value.is_empty() && value != "None"
}

impl fmt::Display for Alert {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", Self::TITLE)?;
		writeln!(f, "{}", Self::MESSAGE)?;
		for detail in self.details() {
			writeln!(f, "  {detail}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn details() {
		let alert = Alert {
			confidence: 0.8731,
			accident_time: Some(1.2),
			accident_type: "Vehicle Collision".to_string(),
			severity: "High".to_string(),
		};

		assert_eq!(
			alert.details(),
			vec!["Time: 1.20s", "Type: Vehicle Collision", "Severity: High", "Confidence: 87.3%"]
		);
	}

	#[test]
	fn unknowns_hidden() {
		let alert = Alert {
			confidence: 0.5,
			accident_time: None,
			accident_type: "None".to_string(),
			severity: String::new(),
		};

		assert_eq!(alert.details(), vec!["Confidence: 50.0%"]);
		assert!(alert.to_string().starts_with("Accident Detected\n"));
	}

	#[test]
	fn halves_round_up() {
		let alert = Alert {
			confidence: 0.1225,
			accident_time: Some(1.125),
			accident_type: String::new(),
			severity: String::new(),
		};

		assert_eq!(alert.details(), vec!["Time: 1.13s", "Confidence: 12.3%"]);
	}
}
