use crate::{
    error::{ Error, Result },
    layout::{ self, Direction },
    stack::SourceImage,
    timer::Timer,
};

use image::{
    DynamicImage, ImageFormat, Rgb, RgbImage,
    codecs::jpeg::JpegEncoder,
    imageops,
};

use std::{
    fs,
    io::{ Cursor, Write },
    path::{ Path, PathBuf },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat{
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat{
    /// Anything that is not a JPEG name falls back to PNG.
    pub fn from_name(name: &str) -> Self{
        match name.trim().to_ascii_lowercase().as_str(){
            "jpeg" | "jpg" => Self::Jpeg,
            _ => Self::Png,
        }
    }

    pub fn ext(self) -> &'static str{
        match self{
            Self::Png => ".png",
            Self::Jpeg => ".jpeg",
        }
    }

    pub fn name(self) -> &'static str{
        match self{
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn toggle(self) -> Self{
        match self{
            Self::Png => Self::Jpeg,
            Self::Jpeg => Self::Png,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome{
    Written(PathBuf),
    NothingToMerge,
}

pub fn output_path(out_dir: &Path, out_name: &str, format: ExportFormat) -> PathBuf{
    out_dir.join(format!("{}_combined{}", out_name, format.ext()))
}

/// Opaque copy of `img`; transparent pixels blend towards white.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage{
    if !img.color().has_alpha(){
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = a as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Pastes the images end to end on a white canvas.
pub fn compose(images: &[SourceImage], direction: Direction) -> Result<RgbImage>{
    let sizes: Vec<_> = images.iter().map(SourceImage::dimensions).collect();
    let plan = layout::plan(&sizes, direction).ok_or(Error::CanvasTooLarge(images.len()))?;
    let mut canvas = RgbImage::from_pixel(plan.width, plan.height, Rgb([255, 255, 255]));
    for (img, &(x, y)) in images.iter().zip(&plan.offsets){
        imageops::replace(&mut canvas, &flatten_onto_white(img.image()), x as i64, y as i64);
    }
    Ok(canvas)
}

pub fn encode(canvas: RgbImage, format: ExportFormat) -> Result<Vec<u8>>{
    let mut bytes = Vec::new();
    match format{
        ExportFormat::Png => {
            DynamicImage::ImageRgb8(canvas)
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(Error::Encode)?;
        },
        ExportFormat::Jpeg => {
            JpegEncoder::new(&mut bytes)
                .encode_image(&canvas)
                .map_err(Error::Encode)?;
        },
    }
    Ok(bytes)
}

/// Writes next to `path` first so a failed write never leaves a truncated target.
fn write_whole(path: &Path, bytes: &[u8]) -> Result<()>{
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.part", name));
    let io_err = |source: std::io::Error| Error::Io{ path: path.to_path_buf(), source };

    let written = fs::File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = written{
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    Ok(())
}

/// Concatenates `images` along `direction` and saves the result as
/// `{out_dir}/{out_name}_combined{.png|.jpeg}`.
pub fn merge(
    images: &[SourceImage],
    direction: Direction,
    out_dir: &Path,
    out_name: &str,
    format: ExportFormat,
) -> Result<MergeOutcome>{
    if images.len() < 2{
        log::debug!("Nothing to merge: {} image(s)", images.len());
        return Ok(MergeOutcome::NothingToMerge);
    }

    let mut timer = Timer::new();
    let canvas = compose(images, direction)?;
    let (w, h) = canvas.dimensions();
    log::debug!("Compose {}x{}: {:?}", w, h, timer.lap());
    let bytes = encode(canvas, format)?;
    log::debug!("Encode {}: {:?}", format.name(), timer.lap());

    let path = output_path(out_dir, out_name, format);
    write_whole(&path, &bytes)?;
    log::info!("Export: {} ({}x{}, {} images, {})", path.display(), w, h, images.len(), direction.name());
    log::debug!("Merge total: {:?}", timer.total());
    Ok(MergeOutcome::Written(path))
}
