use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use framereel_core::audio::infrastructure::wav_codec::read_wav;
use framereel_core::nodes::frame_sink::{FrameSink, SinkInput, SinkOutput, SinkResult};
use framereel_core::nodes::frame_source::FrameSource;
use framereel_core::nodes::frame_timing::FrameTiming;
use framereel_core::nodes::preview::PreviewPayload;
use framereel_core::nodes::sink_config::{DumpMode, SinkConfig};
use framereel_core::shared::encode_settings::{ContainerFormat, PixelFormat, VideoCodec};
use framereel_core::shared::host_folders::HostFolders;
use framereel_core::video::infrastructure::ffmpeg_audio_writer::FfmpegAudioWriter;
use framereel_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use framereel_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use framereel_core::video::infrastructure::webp_thumbnail_encoder::WebpThumbnailEncoder;

/// Loop a video through a frame source into a buffering frame sink.
#[derive(Parser)]
#[command(name = "framereel")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List loadable videos in the input folder.
    List {
        #[arg(long, default_value = "input")]
        input_dir: PathBuf,
    },
    /// Run the source and sink for a number of ticks.
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Video name, resolved against the input folder. Append " [output]" or
    /// " [temp]" to load from those folders instead.
    video: String,

    /// Number of frames to pull through the sink.
    #[arg(long, default_value = "24")]
    ticks: usize,

    #[arg(long, default_value = "input")]
    input_dir: PathBuf,

    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, default_value = "temp")]
    temp_dir: PathBuf,

    /// JSON file with sink settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output name prefix, optionally with a subfolder (e.g. clips/run).
    #[arg(long)]
    filename_prefix: Option<String>,

    #[arg(long)]
    fps: Option<u32>,

    /// Encoder: libx265, libx264, libvpx-vp9, libaom-av1, mpeg4, libvpx.
    #[arg(long)]
    codec: Option<VideoCodec>,

    #[arg(long)]
    pixel_format: Option<PixelFormat>,

    /// Container: mp4, mov, gif, avi.
    #[arg(long)]
    format: Option<ContainerFormat>,

    #[arg(long)]
    quality: Option<u8>,

    /// Flush trigger: max_frames or per_N_frames.
    #[arg(long)]
    dump_by: Option<DumpMode>,

    #[arg(long)]
    dump_every: Option<usize>,

    /// Declared animation length, used by max_frames mode.
    #[arg(long)]
    max_frames: Option<usize>,

    #[arg(long)]
    skip_save: bool,

    /// Report stacked batches instead of discarding them.
    #[arg(long)]
    return_frames: bool,

    #[arg(long)]
    no_preview: bool,

    /// Preview the whole buffer rather than the latest frame.
    #[arg(long)]
    restore: bool,

    /// WAV file muxed into every saved video.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Write the final tick's preview payload here.
    #[arg(long)]
    preview_json: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Command::List { input_dir } => run_list(&input_dir),
        Command::Run(args) => run_nodes(args),
    }
}

fn run_list(input_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let folders = HostFolders::new(input_dir, "", "");
    for name in folders.list_videos()? {
        println!("{name}");
    }
    Ok(())
}

fn run_nodes(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = sink_config(&args)?;
    let folders = HostFolders::new(&args.input_dir, &args.output_dir, &args.temp_dir);
    let audio = args.audio.as_deref().map(read_wav).transpose()?;
    let timing = args.max_frames.map(FrameTiming::with_max_frames);

    let mut source = FrameSource::new(Box::new(FfmpegReader::new()), folders.clone());
    source.validate(&args.video)?;
    let mut sink = FrameSink::new(
        folders,
        Box::new(FfmpegWriter::new()),
        Box::new(FfmpegAudioWriter),
        Box::new(WebpThumbnailEncoder::default()),
    );

    let mut last_preview = None;
    for tick in 0..args.ticks {
        let loaded = source.load_frame(&args.video, false)?;
        log::debug!(
            "Tick {tick}: frame {} (decoder position {})",
            loaded.frame_index,
            loaded.position
        );
        let images = [loaded.frame];
        let mut input = SinkInput::new(&config).with_images(&images);
        if let Some(timing) = &timing {
            input = input.with_timing(timing);
        }
        if let Some(audio) = &audio {
            input = input.with_audio(audio);
        }
        let output = sink.invoke(input)?;
        report(&output);
        last_preview = Some(output.preview);
    }

    let final_config = SinkConfig {
        dump_now: true,
        ..config
    };
    let mut input = SinkInput::new(&final_config);
    if let Some(audio) = &audio {
        input = input.with_audio(audio);
    }
    report(&sink.invoke(input)?);

    if let Some(path) = &args.preview_json {
        write_preview(path, last_preview.unwrap_or_default())?;
    }
    Ok(())
}

fn sink_config(args: &RunArgs) -> Result<SinkConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SinkConfig::default(),
    };

    if let Some(prefix) = &args.filename_prefix {
        config.filename_prefix = prefix.clone();
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if let Some(codec) = args.codec {
        config.codec = codec;
    }
    if let Some(pixel_format) = args.pixel_format {
        config.pixel_format = pixel_format;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(quality) = args.quality {
        config.quality = quality;
    }
    if let Some(dump_by) = args.dump_by {
        config.dump_by = dump_by;
    }
    if let Some(dump_every) = args.dump_every {
        config.dump_every = dump_every;
    }
    config.skip_save |= args.skip_save;
    config.restore |= args.restore;
    if args.return_frames {
        config.skip_return = false;
    }
    if args.no_preview {
        config.enable_preview = false;
    }

    config.validate()?;
    Ok(config)
}

fn report(output: &SinkOutput) {
    for path in &output.saved {
        println!("Saved {}", path.display());
    }
    if let SinkResult::Batch(batch) = &output.result {
        let (count, height, width, channels) = batch.as_ndarray().dim();
        println!("Batch of {count} frames ({width}x{height}, {channels} channels)");
    }
}

fn write_preview(path: &Path, preview: PreviewPayload) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, preview.to_json()?)?;
    println!("Preview written to {}", path.display());
    Ok(())
}
