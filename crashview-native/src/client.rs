use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crashview::upload::{self, Health};
use crashview::{AnalysisResult, Error};
use reqwest::multipart::{Form, Part};
use url::Url;

#[derive(clap::Args, Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ClientConfig {
	/// The base URL of the accident detection backend.
	#[arg(long, env = "CRASHVIEW_BACKEND_URL", default_value = upload::DEFAULT_BACKEND)]
	pub backend: Url,

	/// Give up on a request after this many seconds.
	/// Analysis runs while the upload is held open, so long videos need a generous limit.
	#[arg(long, env = "CRASHVIEW_TIMEOUT", default_value_t = 300)]
	pub timeout: u64,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			backend: Url::parse(upload::DEFAULT_BACKEND).unwrap(),
			timeout: 300,
		}
	}
}

impl ClientConfig {
	pub fn init(self) -> anyhow::Result<Client> {
		Client::new(self)
	}
}

#[derive(Clone)]
pub struct Client {
	http: reqwest::Client,
	backend: Url,
}

impl Client {
	pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
		let http = reqwest::Client::builder()
			.timeout(Duration::from_secs(config.timeout))
			.build()
			.context("failed to build http client")?;

		Ok(Self {
			http,
			backend: config.backend,
		})
	}

	pub fn backend(&self) -> &Url {
		&self.backend
	}

	/// Upload a video and wait for the backend to analyze it.
	pub async fn upload(&self, path: &Path) -> anyhow::Result<AnalysisResult> {
		if !tokio::fs::metadata(path).await.is_ok_and(|metadata| metadata.is_file()) {
			return Err(Error::MissingFile.into());
		}

		let media_type = upload::media_type(path).ok_or(Error::NotVideo)?;
		upload::ensure_video(media_type)?;

		self.post(upload::UPLOAD_PATH, upload::UPLOAD_FIELD, path, media_type)
			.await
	}

	/// Analyze a single frame, as the live feed does.
	pub async fn detect(&self, path: &Path) -> anyhow::Result<AnalysisResult> {
		let media_type = upload::media_type(path).unwrap_or("application/octet-stream");

		self.post(upload::STREAM_PATH, upload::STREAM_FIELD, path, media_type)
			.await
	}

	pub async fn health(&self) -> anyhow::Result<Health> {
		let url = upload::endpoint(&self.backend, upload::HEALTH_PATH)?;
		tracing::debug!(%url, "checking health");

		let response = self
			.http
			.get(url.clone())
			.send()
			.await
			.with_context(|| format!("failed to reach {url}"))?
			.error_for_status()?;

		let health = response.json().await.context("invalid health response")?;
		Ok(health)
	}

	async fn post(&self, endpoint: &str, field: &str, path: &Path, media_type: &str) -> anyhow::Result<AnalysisResult> {
		let url = upload::endpoint(&self.backend, endpoint)?;

		let bytes = tokio::fs::read(path)
			.await
			.with_context(|| format!("failed to read {}", path.display()))?;

		let name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| field.to_string());

		tracing::info!(%url, %name, %media_type, size = bytes.len(), "uploading");

		let part = Part::bytes(bytes).file_name(name).mime_str(media_type)?;
		let form = Form::new().part(field.to_string(), part);

		let response = self
			.http
			.post(url.clone())
			.multipart(form)
			.send()
			.await
			.with_context(|| format!("failed to reach {url}"))?;

		let status = response.status();
		let body = response.bytes().await.context("failed to read response")?;
		tracing::debug!(%status, size = body.len(), "response");

		Ok(upload::parse_response(status.is_success(), &body)?)
	}
}
