use anyhow::Context;
use serde_with::DisplayFromStr;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[serde_with::serde_as]
#[derive(clap::Args, Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Log {
	/// The level to log at, unless RUST_LOG says otherwise.
	#[arg(id = "log-level", long = "log-level", default_value_t = Level::INFO, env = "CRASHVIEW_LOG_LEVEL")]
	#[serde_as(as = "DisplayFromStr")]
	pub level: Level,
}

impl Default for Log {
	fn default() -> Self {
		Self { level: Level::INFO }
	}
}

impl Log {
	/// Install a global subscriber that logs to stderr.
	pub fn init(&self) -> anyhow::Result<()> {
		let filter = EnvFilter::builder()
			.with_default_directive(LevelFilter::from_level(self.level).into())
			.from_env_lossy() // Allow overriding with RUST_LOG
			.add_directive("h2=warn".parse()?)
			.add_directive("hyper_util=warn".parse()?)
			.add_directive("reqwest=info".parse()?);

		let logger = tracing_subscriber::FmtSubscriber::builder()
			.with_writer(std::io::stderr)
			.with_env_filter(filter)
			.finish();

		tracing::subscriber::set_global_default(logger).context("failed to install logger")?;

		Ok(())
	}
}
