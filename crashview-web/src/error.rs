use wasm_bindgen::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Crashview(#[from] crashview::Error),

	#[error("http error: {0}")]
	Http(#[from] gloo_net::Error),

	#[error("canvas has no 2d context")]
	NoContext,

	#[error("no window")]
	NoWindow,

	#[error("js error: {0}")]
	Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<JsValue> for Error {
	fn from(value: JsValue) -> Self {
		match value.as_string() {
			Some(message) => Error::Js(message),
			None => Error::Js(format!("{value:?}")),
		}
	}
}

impl From<Error> for JsValue {
	fn from(err: Error) -> JsValue {
		let message = match err.to_string() {
			message if message.is_empty() => crashview::upload::UNEXPECTED_ERROR.to_string(),
			message => message,
		};

		JsError::new(&message).into()
	}
}
