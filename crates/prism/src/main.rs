use anyhow::Context;
use clap::{Parser, Subcommand};
use photos::{SizeCache, load_photos};
use prism::config::{self, Config, MasonryOverrides};
use prism::masonry::{AspectRatio, Axis, PlacementResult};
use prism::picker::{self, ColorPicker};
use prism::radial::{RadialArc, RadialLayout};
use prism::ring::{self, RingMapper};
use prism::{Point, Rect, Size};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prism", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Hue (and angle) of a point on the picker ring.
    Hue {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Side of the square holding the ring
        #[arg(long)]
        size: Option<f64>,
    },
    /// Snap a point onto the ring's centerline.
    Ring {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(long)]
        size: Option<f64>,
        #[arg(long)]
        thickness: Option<f64>,
    },
    /// Positions of radial menu items.
    Radial {
        count: usize,
        /// full, trailing, leading, or degrees
        #[arg(long)]
        arc: Option<RadialArc>,
        /// Degrees added to every item; 0 starts at the top
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<f64>,
        #[arg(long)]
        size: Option<f64>,
        /// Size of each menu item, WIDTHxHEIGHT
        #[arg(long, default_value = "44x44")]
        item_size: Size,
    },
    /// Pack items into a masonry grid.
    Masonry {
        /// Item sizes as WIDTHxHEIGHT; scaled to the track keeping their ratio
        sizes: Vec<Size>,
        /// Photo list (JSON, as returned by the photos API) to pack instead
        #[arg(long, conflicts_with = "sizes")]
        photos: Option<PathBuf>,
        /// Sizes measured from the decoded images (JSON object of URL to
        /// width and height); these win over the photo metadata
        #[arg(long, requires = "photos")]
        measured: Option<PathBuf>,
        #[arg(long, allow_negative_numbers = true)]
        tracks: Option<i64>,
        #[arg(long)]
        spacing: Option<f64>,
        #[arg(long)]
        axis: Option<Axis>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },
    /// Color picked at a point on the ring, or recovered from a hex color.
    Color {
        #[arg(allow_negative_numbers = true, required_unless_present = "hex")]
        x: Option<f64>,
        #[arg(allow_negative_numbers = true, required_unless_present = "hex")]
        y: Option<f64>,
        #[arg(long, conflicts_with_all = ["x", "y"])]
        hex: Option<String>,
        #[arg(long)]
        saturation: Option<f64>,
        #[arg(long)]
        brightness: Option<f64>,
    },
    /// Write the default config file if none exists.
    InitConfig,
}

#[derive(Serialize)]
struct HueReport {
    angle: f64,
    degrees: f64,
    hue: f64,
}

#[derive(Serialize)]
struct RingReport {
    point: Point,
    offset: Size,
    angle: f64,
}

#[derive(Serialize)]
struct ColorReport {
    hex: String,
    hue: f64,
    saturation: f64,
    brightness: f64,
    selector: Point,
    offset: Size,
}

#[derive(Serialize)]
struct RadialReport {
    index: usize,
    angle: f64,
    frame: Rect,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(Some(path.as_path()))
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load_or_default(None),
    };

    match cli.command.clone() {
        Commands::Hue { x, y, size } => hue(&cli, &config, Point::new(x, y), size),
        Commands::Ring {
            x,
            y,
            size,
            thickness,
        } => ring(&cli, &config, Point::new(x, y), size, thickness),
        Commands::Radial {
            count,
            arc,
            offset,
            size,
            item_size,
        } => radial(&cli, &config, count, arc, offset, size, item_size),
        Commands::Masonry {
            sizes,
            photos,
            measured,
            tracks,
            spacing,
            axis,
            width,
            height,
        } => {
            let masonry = config.masonry.merged(&MasonryOverrides {
                tracks,
                spacing,
                axis,
                width,
                height,
            });
            let packer = masonry.packer()?;
            let container = masonry.container();

            let result = match photos {
                Some(path) => {
                    if let Some(measured) = &measured {
                        SizeCache::shared().load(measured).with_context(|| {
                            format!("Failed to load measured sizes from {}", measured.display())
                        })?;
                    }
                    let photos = load_photos(&path).with_context(|| {
                        format!("Failed to load photos from {}", path.display())
                    })?;
                    packer.pack(&photos, container)
                }
                None => {
                    let items: Vec<AspectRatio> =
                        sizes.into_iter().map(AspectRatio::from).collect();
                    packer.pack(&items, container)
                }
            };
            print_masonry(&cli, &result)
        }
        Commands::Color {
            x,
            y,
            hex,
            saturation,
            brightness,
        } => {
            let ring = picker_ring(&config, None, None)?;
            let mut picker = match hex {
                Some(hex) => ColorPicker::with_color(ring, picker::parse_hex(&hex)?),
                None => {
                    let mut picker = ColorPicker::new(ring);
                    picker.drag_to(Point::new(x.unwrap_or_default(), y.unwrap_or_default()));
                    picker
                }
            };
            if let Some(s) = saturation {
                picker.set_saturation(s);
            }
            if let Some(b) = brightness {
                picker.set_brightness(b);
            }
            print_color(&cli, &picker)
        }
        Commands::InitConfig => {
            let path = config::write_default_config().context("Failed to write default config")?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn picker_ring(
    config: &Config,
    size: Option<f64>,
    thickness: Option<f64>,
) -> anyhow::Result<RingMapper> {
    let size = size.unwrap_or(config.picker.size);
    let thickness = thickness.unwrap_or(config.picker.ring_thickness);
    Ok(RingMapper::new(Size::square(size), thickness)?)
}

fn hue(cli: &Cli, config: &Config, point: Point, size: Option<f64>) -> anyhow::Result<()> {
    let container = Size::square(size.unwrap_or(config.picker.size));
    let angle = ring::angle_from_point(point, container);
    let report = HueReport {
        angle,
        degrees: angle.to_degrees(),
        hue: ring::hue_from_point(point, container),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "angle {:.4} rad ({:.2}°), hue {:.4}",
            report.angle, report.degrees, report.hue
        );
    }
    Ok(())
}

fn ring(
    cli: &Cli,
    config: &Config,
    point: Point,
    size: Option<f64>,
    thickness: Option<f64>,
) -> anyhow::Result<()> {
    let mapper = picker_ring(config, size, thickness)?;
    let projected = mapper.project(point);
    let report = RingReport {
        point: projected,
        offset: mapper.offset(projected),
        angle: mapper.angle(point),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "({:.2}, {:.2}) offset ({:.2}, {:.2}) angle {:.4}",
            report.point.x, report.point.y, report.offset.width, report.offset.height, report.angle
        );
    }
    Ok(())
}

fn radial(
    cli: &Cli,
    config: &Config,
    count: usize,
    arc: Option<RadialArc>,
    offset: Option<f64>,
    size: Option<f64>,
    item_size: Size,
) -> anyhow::Result<()> {
    let layout = RadialLayout::new(
        arc.unwrap_or(config.radial.arc),
        offset.unwrap_or(config.radial.angle_offset),
    );
    let bounds = Rect::from_size(Size::square(size.unwrap_or(config.radial.size)));
    let items = vec![item_size; count];

    let report: Vec<_> = layout
        .place(bounds, &items)
        .into_iter()
        .enumerate()
        .map(|(index, placement)| RadialReport {
            index,
            angle: layout.angle(index, count),
            frame: placement.frame(),
        })
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for item in &report {
            println!(
                "{:>3}  angle {:>8.2}°  at ({:.2}, {:.2}) {}x{}",
                item.index,
                item.angle.to_degrees(),
                item.frame.origin.x,
                item.frame.origin.y,
                item.frame.size.width,
                item.frame.size.height
            );
        }
    }
    Ok(())
}

fn print_masonry(cli: &Cli, result: &PlacementResult) -> anyhow::Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    for (index, placement) in result.placements.iter().enumerate() {
        let frame = placement.frame;
        println!(
            "{:>3}  track {}  at ({:.2}, {:.2}) {:.2}x{:.2}",
            index,
            placement.track,
            frame.origin.x,
            frame.origin.y,
            frame.size.width,
            frame.size.height
        );
    }
    println!(
        "content {:.2}x{:.2}",
        result.content_size.width, result.content_size.height
    );
    Ok(())
}

fn print_color(cli: &Cli, picker: &ColorPicker) -> anyhow::Result<()> {
    let report = ColorReport {
        hex: picker::to_hex(picker.color()),
        hue: picker.hue(),
        saturation: picker.saturation(),
        brightness: picker.brightness(),
        selector: picker.selector(),
        offset: picker.selector_offset(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} hue {:.4} saturation {:.2} brightness {:.2} selector ({:.2}, {:.2})",
            report.hex,
            report.hue,
            report.saturation,
            report.brightness,
            report.selector.x,
            report.selector.y
        );
    }
    Ok(())
}
