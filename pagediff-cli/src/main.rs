use std::io::BufRead as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use pagediff::{CanvasSink, DiffCanvas, Differ, PagediffResult, PngSequenceSink};
use tracing_subscriber::filter::LevelFilter;

/// Compare two same-sized images and render one annotated canvas per changed region.
#[derive(Parser, Debug)]
#[command(name = "pagediff", version)]
struct Cli {
    /// Baseline image.
    before: PathBuf,

    /// Changed image, same dimensions as BEFORE.
    after: PathBuf,

    /// Write canvases to `{PREFIX}{index}.png` instead of previewing them.
    prefix: Option<PathBuf>,
}

/// Writes each canvas to a temp file, prints its path, and waits for Enter before continuing.
struct PreviewSink {
    files: PngSequenceSink,
}

impl CanvasSink for PreviewSink {
    fn begin(&mut self, regions: usize) -> PagediffResult<()> {
        eprintln!("{regions} region(s) differ");
        self.files.begin(regions)
    }

    fn push_canvas(&mut self, canvas: &DiffCanvas) -> PagediffResult<()> {
        self.files.push_canvas(canvas)?;
        eprintln!(
            "preview {}: {} (press Enter for the next one)",
            canvas.index,
            self.files.path_for(canvas.index).display()
        );
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read from stdin")?;
        Ok(())
    }

    fn end(&mut self) -> PagediffResult<()> {
        self.files.end()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::WARN)
        .with_writer(std::io::stderr)
        .init();

    let before = pagediff::open_image(&cli.before)
        .with_context(|| format!("load '{}'", cli.before.display()))?;
    let after = pagediff::open_image(&cli.after)
        .with_context(|| format!("load '{}'", cli.after.display()))?;

    let differ = Differ::default();
    match cli.prefix {
        Some(prefix) => cmd_write(&differ, &before, &after, prefix),
        None => cmd_preview(&differ, &before, &after),
    }
}

fn cmd_write(
    differ: &Differ,
    before: &pagediff::RgbImage,
    after: &pagediff::RgbImage,
    prefix: PathBuf,
) -> anyhow::Result<()> {
    let mut sink = PngSequenceSink::new(prefix);
    match differ.run(before, after, &mut sink) {
        Ok(stats) => {
            for path in sink.written() {
                eprintln!("wrote {}", path.display());
            }
            if stats.regions == 0 {
                eprintln!("no differences");
            }
            Ok(())
        }
        Err(e) => {
            sink.discard();
            Err(anyhow::Error::new(e).context("diff failed; partial output removed"))
        }
    }
}

fn cmd_preview(
    differ: &Differ,
    before: &pagediff::RgbImage,
    after: &pagediff::RgbImage,
) -> anyhow::Result<()> {
    let prefix = std::env::temp_dir().join(format!("pagediff-{}-", std::process::id()));
    let mut sink = PreviewSink {
        files: PngSequenceSink::new(prefix),
    };
    let result = differ.run(before, after, &mut sink);
    sink.files.discard();
    let stats = result.context("diff failed")?;
    if stats.regions == 0 {
        eprintln!("no differences");
    }
    Ok(())
}
