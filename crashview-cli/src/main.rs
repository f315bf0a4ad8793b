use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crashview::Dashboard;

mod render;

#[derive(Parser, Clone)]
#[command(name = "crashview")]
#[command(about = "Upload videos for accident detection and render the overlays", long_about = None)]
pub struct Config {
	/// The backend client configuration.
	#[command(flatten)]
	pub client: crashview_native::ClientConfig,

	/// The log configuration.
	#[command(flatten)]
	pub log: crashview_native::Log,

	/// The command to execute.
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
	/// Upload a video for analysis and print the results.
	Upload {
		/// The video to analyze.
		file: PathBuf,

		/// Also write the accident report to this path.
		///
		/// If the path is a directory, the report is written as `accident_report.json` inside it.
		#[arg(long)]
		report: Option<PathBuf>,

		/// Write the raw analysis as JSON to this path, for use with `render`.
		#[arg(long)]
		save: Option<PathBuf>,
	},

	/// Render the detection overlay for a saved analysis as SVG.
	Render(render::Args),

	/// Analyze a single frame, as the live feed does.
	Detect {
		/// The image to analyze.
		image: PathBuf,
	},

	/// Check that the backend is up.
	Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let config = Config::parse();
	config.log.init()?;

	match config.command {
		Command::Upload { file, report, save } => {
			let client = config.client.init()?;
			upload(client, file, report, save).await
		}
		Command::Render(args) => render::run(args),
		Command::Detect { image } => {
			let client = config.client.init()?;
			let result = client.detect(&image).await?;
			println!("{}", result.to_string_pretty()?);
			Ok(())
		}
		Command::Health => {
			let client = config.client.init()?;
			let health = client.health().await?;

			tracing::info!(backend = %client.backend(), status = %health.status, "health");
			anyhow::ensure!(health.is_ok(), "backend is not healthy: {}", health.status);

			println!("{}", health.status);
			Ok(())
		}
	}
}

async fn upload(
	client: crashview_native::Client,
	file: PathBuf,
	report: Option<PathBuf>,
	save: Option<PathBuf>,
) -> anyhow::Result<()> {
	let mut dashboard = Dashboard::new();

	dashboard.start_upload();
	let result = client.upload(&file).await;
	let failed = result.is_err();
	dashboard.complete_upload(Some(file.display().to_string()), result);

	print!("{dashboard}");
	if let Some(alert) = dashboard.alert() {
		println!();
		print!("{alert}");
	}

	if failed {
		anyhow::bail!("upload failed");
	}

	if let Some(path) = save {
		fs::write(&path, dashboard.result().to_string_pretty()?)
			.with_context(|| format!("failed to write {}", path.display()))?;
	}

	if let Some(mut path) = report {
		let Some(report) = dashboard.report() else {
			tracing::warn!("nothing detected, skipping the report");
			return Ok(());
		};

		if path.is_dir() {
			path.push(crashview::Report::FILE_NAME);
		}

		let file = fs::File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
		report.to_writer_pretty(file)?;

		tracing::info!(path = %path.display(), "wrote report");
	}

	Ok(())
}
