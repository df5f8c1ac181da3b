use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error{
    #[error("not a file: {0}")]
    InvalidSource(PathBuf),

    #[error("unsupported image type: {0} (supported: .JPG, .jpg, .png)")]
    UnsupportedType(PathBuf),

    #[error("could not decode {path}: {source}")]
    Decode{
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not encode merged image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("merged image would be too large: {0} images")]
    CanvasTooLarge(usize),

    #[error("could not write {path}: {source}")]
    Io{
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
