use crate::model::Distribution;
use anyhow::{Context, Result, bail};
use plotters::{prelude::*, style::register_font};
use std::{
    io::{self, Write},
    path::Path,
    sync::OnceLock,
};

const TITLE: &str = "Gaussian distribution";

/// 7 x 4.5 inches at 150 dpi.
const IMAGE_SIZE: (u32, u32) = (1050, 675);

/// Family every chart text is drawn with.
const FONT_FAMILY: &str = "sans-serif";

static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Width of the longest bar of the text chart, in characters.
const BAR_WIDTH: usize = 50;

/// Draw the distribution (percent over number of heads).
///
/// If `save_as` is a non-empty path, the chart is also saved there as an image.
/// The chart is always displayed on stdout.
pub fn draw_distribution_graph(dist: &Distribution, save_as: Option<&Path>) -> Result<()> {
    if let Some(file) = save_as.filter(|file| !file.as_os_str().is_empty()) {
        save_chart(dist, file).with_context(|| format!("failed to save chart to {file:?}"))?;
        log::info!("saved {file:?}");
    }

    let mut writer = io::stdout().lock();
    write_text_chart(dist, &mut writer).context("failed to display chart")?;
    writer.flush().context("failed to flush stdout")?;

    Ok(())
}

/// Register the bundled font under [`FONT_FAMILY`], once per process.
fn register_chart_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok());
    if !registered {
        bail!("failed to register bundled font");
    }
    Ok(())
}

fn save_chart(dist: &Distribution, file: &Path) -> Result<()> {
    register_chart_font()?;

    let max = dist.max();
    let y_max = if max > 0.0 { max * 1.2 } else { 1.0 };
    let x_max = dist.flips() as f64;

    let root = BitMapBackend::new(file, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, (FONT_FAMILY, 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..x_max + 0.5, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.1))
        .x_labels(dist.len().min(21))
        .x_desc("Heads count")
        .y_desc("Percentage %")
        .label_style((FONT_FAMILY, 14))
        .draw()?;

    let points: Vec<(f64, f64)> = dist.iter().map(|(k, pct)| (k as f64, pct)).collect();
    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 4, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Write a horizontal bar chart of the distribution, one row per heads count.
pub fn write_text_chart<W: Write>(dist: &Distribution, writer: &mut W) -> Result<()> {
    let max = dist.max();
    let key_width = dist.flips().to_string().len();

    writeln!(writer, "{TITLE}")?;
    for (k, pct) in dist.iter() {
        let len = if max > 0.0 {
            (pct / max * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = "#".repeat(len);
        writeln!(writer, "{k:>key_width$} | {bar:<BAR_WIDTH$} {pct:6.2}%")?;
    }

    Ok(())
}
