use crashview::upload;
use url::Url;
use wasm_bindgen::prelude::*;
use web_sys::{File, FormData};

use crate::{Error, Result};

/// Upload a video to the backend and resolve to its analysis.
///
/// Rejects with a message suitable for showing to the user.
#[wasm_bindgen(js_name = upload)]
pub async fn upload_video(base: String, file: Option<File>) -> std::result::Result<JsValue, JsValue> {
	let result = analyze(&base, file).await?;
	let json = result.to_string_pretty().map_err(Error::from)?;
	Ok(js_sys::JSON::parse(&json)?)
}

pub async fn analyze(base: &str, file: Option<File>) -> Result<crashview::AnalysisResult> {
	let file = file.ok_or(crashview::Error::MissingFile)?;
	upload::ensure_video(&file.type_())?;

	let base = Url::parse(base).map_err(crashview::Error::from)?;
	let url = upload::endpoint(&base, upload::UPLOAD_PATH)?;

	tracing::info!(%url, name = %file.name(), size = file.size(), "uploading");

	let form = FormData::new()?;
	form.append_with_blob_and_filename(upload::UPLOAD_FIELD, &file, &file.name())?;

	let response = gloo_net::http::Request::post(url.as_str()).body(form)?.send().await?;
	let success = response.ok();
	let body = response.binary().await?;

	Ok(upload::parse_response(success, &body)?)
}
