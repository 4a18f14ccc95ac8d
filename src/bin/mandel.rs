use clap::{App, Arg, ArgMatches};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use itertools::iproduct;
use log::info;
use mandelbrot::FractalView;
use num::{clamp, Complex};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Splits "a<sep>b" into two parsed values.
fn split_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let index = s.find(separator)?;
    let left = T::from_str(&s[..index]).ok()?;
    let right = T::from_str(&s[index + 1..]).ok()?;
    Some((left, right))
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    split_pair(s, ',').map(|(re, im)| Complex::new(re, im))
}

/// A clap validator: the value must parse as a `T` and pass `accept`.
fn validate_with<T, F>(s: &str, accept: F, unparsable: &str, rejected: &str) -> Result<(), String>
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    match T::from_str(s) {
        Ok(ref value) if accept(value) => Ok(()),
        Ok(_) => Err(rejected.to_string()),
        Err(_) => Err(unparsable.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer with histogram coloring")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| match split_pair::<usize>(&s, 'x') {
                    Some((w, h)) if w > 0 && h > 0 => Ok(()),
                    _ => Err("Could not parse output image size".to_string()),
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.5,0")
                .validator(|s| match parse_complex(&s) {
                    Some(c) if c.re.is_finite() && c.im.is_finite() => Ok(()),
                    _ => Err("Could not parse center point".to_string()),
                })
                .help("Point of the complex plane at the center of the image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("0.5")
                .validator(|s| {
                    validate_with(
                        &s,
                        |z: &f64| *z > 0.0 && z.is_finite(),
                        "Could not parse zoom",
                        "Zoom must be a positive number",
                    )
                })
                .help("Zoom level; the image spans 2/zoom horizontally"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_with(
                        &s,
                        |t: &usize| *t >= 1 && *t <= max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: one per CPU)"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_with(
                        &s,
                        |i: &usize| *i >= 1 && *i <= 1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .get_matches()
}

/// Shades the view row by row.  In-set pixels are black; everything
/// else is shaded by its hue.
fn pixelate(view: &FractalView) -> Vec<u8> {
    let max_iterations = view.max_iterations() as u32;
    let (buffer, hue) = (view.buffer(), view.hue());
    iproduct!(0..hue.height(), 0..hue.width())
        .map(|(y, x)| {
            if buffer.get(x, y) == max_iterations {
                0
            } else {
                clamp(hue.get(x, y) * 255.0, 0.0, 255.0) as u8
            }
        })
        .collect()
}

/// Writes the view as a binary greymap.
fn write_view(outfile: &Path, view: &FractalView) -> Result<(), failure::Error> {
    let pixels = pixelate(view);
    let output = File::create(outfile)?;
    PNMEncoder::new(output)
        .with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary))
        .encode(
            &pixels[..],
            view.width() as u32,
            view.height() as u32,
            ColorType::Gray(8),
        )?;
    Ok(())
}

fn render(matches: &ArgMatches) -> Result<(), failure::Error> {
    let (width, height) = split_pair::<usize>(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .ok_or_else(|| failure::err_msg("Error parsing image dimensions"))?;
    let center = parse_complex(matches.value_of(CENTER).unwrap_or_default())
        .ok_or_else(|| failure::err_msg("Error parsing center point"))?;
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap_or_default())?;
    let threads = match matches.value_of(THREADS) {
        Some(t) => usize::from_str(t)?,
        None => num_cpus::get(),
    };
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap_or_default())?;
    let outfile = matches
        .value_of(OUTPUT)
        .ok_or_else(|| failure::err_msg("No output file given"))?;

    let mut view = FractalView::new(width, height, center)?;
    view.set_zoom(zoom)?;
    view.set_max_iterations(iterations)?;
    view.set_threads(threads);

    info!(
        "Rendering {}x{} at {} zoom {} ({} iterations, {} threads)",
        width, height, center, zoom, iterations, threads
    );
    view.generate()?;

    write_view(Path::new(outfile), &view)?;
    info!("Wrote {}", outfile);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = render(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
