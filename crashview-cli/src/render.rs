use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use crashview::overlay::{HeadlessVideo, Size, Viewport};
use crashview::{to_fixed, AnalysisResult, Canvas, Overlay, Renderer, TimelineStrip, Window};

/// The most frames a single --step render writes.
const MAX_FRAMES: usize = 100_000;

#[derive(clap::Args, Clone, Debug)]
pub struct Args {
	/// A saved analysis, as written by `upload --save`.
	#[arg(long)]
	pub result: PathBuf,

	/// Render a single frame at this playback time, in seconds.
	#[arg(long, conflicts_with = "step", required_unless_present = "step")]
	pub time: Option<f64>,

	/// Render a frame every this many seconds, over the whole video.
	#[arg(long)]
	pub step: Option<f64>,

	/// The SVG file to write, or a directory of frames when using --step.
	#[arg(long)]
	pub out: PathBuf,

	/// The displayed width of the video, defaulting to 640.
	#[arg(long)]
	pub width: Option<u32>,

	/// The displayed height of the video, defaulting to 360.
	#[arg(long)]
	pub height: Option<u32>,

	/// How close to a detection's timestamp, in seconds, it stays visible.
	#[arg(long, default_value_t = Window::DEFAULT_TOLERANCE)]
	pub window: f64,
}

pub fn run(args: Args) -> anyhow::Result<()> {
	let file = fs::File::open(&args.result).with_context(|| format!("failed to open {}", args.result.display()))?;
	let result = AnalysisResult::from_reader(BufReader::new(file)).context("invalid analysis")?;

	let video = Rc::new(HeadlessVideo::new());
	let viewport = Viewport::new();

	if args.width.is_some() || args.height.is_some() {
		// A missing axis falls back on its own.
		video.layout(Size::new(args.width.unwrap_or(0), args.height.unwrap_or(0)));
	}

	let mut renderer = Renderer::new(Canvas::default()).with_window(Window::new(args.window)?);
	renderer.set_detections(result.boxes.clone());

	let overlay = Overlay::mount(renderer, video.clone(), viewport);

	match (args.time, args.step) {
		(Some(time), _) => {
			video.seek(time);
			write(&overlay, &args.out)?;
		}
		(None, Some(step)) => {
			anyhow::ensure!(step.is_finite() && step > 0.0, "step must be positive: {step}");

			let duration = duration(&result);
			let frames = (duration / step).floor() + 1.0;
			anyhow::ensure!(
				frames <= MAX_FRAMES as f64,
				"step {step} is too small: {frames} frames over {duration}s, the limit is {MAX_FRAMES}"
			);
			let frames = frames as usize;

			fs::create_dir_all(&args.out).with_context(|| format!("failed to create {}", args.out.display()))?;

			for index in 0..frames {
				video.seek(index as f64 * step);
				write(&overlay, &args.out.join(format!("frame_{index:05}.svg")))?;
			}

			tracing::info!(frames, %duration, out = %args.out.display(), "rendered");
		}
		(None, None) => anyhow::bail!("either --time or --step is required"),
	}

	if let Some(timeline) = TimelineStrip::new(result.video_duration, &result.timeline_markers) {
		let positions: Vec<_> = timeline.positions().map(|p| format!("{}%", to_fixed(p, 1))).collect();
		println!(
			"timeline: {} [{}] {}",
			timeline.start_label(),
			positions.join(", "),
			timeline.end_label()
		);
	}

	Ok(())
}

// The video's length if the backend knew it, otherwise up to the last detection.
fn duration(result: &AnalysisResult) -> f64 {
	if result.video_duration.is_finite() && result.video_duration > 0.0 {
		return result.video_duration;
	}

	result
		.boxes
		.iter()
		.filter_map(|detection| detection.timestamp)
		.filter(|timestamp| timestamp.is_finite())
		.fold(0.0, f64::max)
}

fn write(overlay: &Overlay<Canvas>, path: &Path) -> anyhow::Result<()> {
	let renderer = overlay.renderer();
	let canvas = renderer.surface();

	tracing::debug!(path = %path.display(), boxes = canvas.outlines().count(), "writing frame");
	fs::write(path, canvas.to_svg()).with_context(|| format!("failed to write {}", path.display()))
}
