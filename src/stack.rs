use crate::{
    error::{ Error, Result },
    layout::{ self, Direction },
    timer::Timer,
};

use image::{ DynamicImage, ImageReader };

use std::path::{ Path, PathBuf };

/// Case-sensitive suffixes accepted on drop.
pub const SUPPORTED_IMAGE_TYPES: [&str; 3] = [".JPG", ".jpg", ".png"];

/// A decoded input image. Pixels are never touched after decode.
#[derive(Debug)]
pub struct SourceImage{
    path: PathBuf,
    image: DynamicImage,
}

impl SourceImage{
    pub fn open(path: &Path) -> Result<Self>{
        let decode_err = |source: image::ImageError| Error::Decode{ path: path.to_path_buf(), source };
        let image = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| decode_err(image::ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;
        Ok(Self::from_image(path.to_path_buf(), image))
    }

    pub fn from_image(path: PathBuf, image: DynamicImage) -> Self{
        Self{ path, image }
    }

    pub fn path(&self) -> &Path{
        &self.path
    }

    pub fn image(&self) -> &DynamicImage{
        &self.image
    }

    pub fn width(&self) -> u32{
        self.image.width()
    }

    pub fn height(&self) -> u32{
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32){
        (self.width(), self.height())
    }
}

#[derive(Debug, Default)]
pub struct ImageStack{
    images: Vec<SourceImage>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
}

pub fn is_supported(path: &Path) -> bool{
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| SUPPORTED_IMAGE_TYPES.iter().any(|ext| n.ends_with(ext)))
        .unwrap_or(false)
}

impl ImageStack{
    pub fn new() -> Self{
        Self::default()
    }

    /// Validates, decodes and appends `path`. The first image of a session
    /// decides where the merged file goes and what it is called.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<&SourceImage>{
        let path = path.as_ref();
        if !path.is_file(){
            return Err(Error::InvalidSource(path.to_path_buf()));
        }
        if !is_supported(path){
            return Err(Error::UnsupportedType(path.to_path_buf()));
        }

        let mut timer = Timer::new();
        let img = SourceImage::open(path)?;
        log::info!("Import: {} ({}x{})", path.display(), img.width(), img.height());
        log::debug!("Decode: {:?}", timer.lap());

        if self.output_dir.is_none(){
            self.output_dir = Some(path.parent().map(Path::to_path_buf).unwrap_or_default());
        }
        if self.output_name.is_none(){
            let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned());
            self.output_name = Some(stem.unwrap_or_default());
        }

        self.images.push(img);
        Ok(&self.images[self.images.len() - 1])
    }

    pub fn clear(&mut self){
        log::debug!("Clear images");
        self.images.clear();
        self.output_dir = None;
        self.output_name = None;
    }

    pub fn count(&self) -> usize{
        self.images.len()
    }

    pub fn is_empty(&self) -> bool{
        self.images.is_empty()
    }

    pub fn images(&self) -> &[SourceImage]{
        &self.images
    }

    pub fn output_dir(&self) -> Option<&Path>{
        self.output_dir.as_deref()
    }

    pub fn output_name(&self) -> Option<&str>{
        self.output_name.as_deref()
    }

    pub fn sizes(&self) -> Vec<(u32, u32)>{
        self.images.iter().map(SourceImage::dimensions).collect()
    }

    /// Size of the merged canvas for `direction`, `None` when it overflows.
    pub fn extent(&self, direction: Direction) -> Option<(u32, u32)>{
        layout::plan(&self.sizes(), direction).map(|p| (p.width, p.height))
    }
}
