use crate::{
    error::Result,
    export::{ self, ExportFormat, MergeOutcome },
    layout::{ self, LayoutState, Placement },
    stack::ImageStack,
};

use std::path::{ Path, PathBuf };

/// Something the user asked for, independent of how it was asked.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent{
    AddImage(PathBuf),
    Confirm,
    Cancel,
    ToggleDirection,
    ZoomIn,
    ZoomOut,
    ToggleFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status{
    Added{ count: usize },
    Exported(PathBuf),
    NothingToMerge,
    Cleared,
    LayoutChanged(LayoutState),
    FormatChanged(ExportFormat),
}

#[derive(Debug, Default)]
pub struct Session{
    stack: ImageStack,
    pub layout: LayoutState,
    pub format: ExportFormat,
}

impl Session{
    pub fn new(layout: LayoutState, format: ExportFormat) -> Self{
        Self{ stack: ImageStack::new(), layout, format }
    }

    pub fn stack(&self) -> &ImageStack{
        &self.stack
    }

    pub fn handle(&mut self, intent: Intent) -> Result<Status>{
        log::debug!("Intent: {:?}", intent);
        match intent{
            Intent::AddImage(path) => {
                self.stack.add(&path)?;
                Ok(Status::Added{ count: self.stack.count() })
            },
            Intent::Confirm => self.confirm(),
            Intent::Cancel => {
                self.stack.clear();
                Ok(Status::Cleared)
            },
            Intent::ToggleDirection => {
                self.layout.toggle_direction();
                Ok(Status::LayoutChanged(self.layout))
            },
            Intent::ZoomIn => {
                self.layout.zoom_in();
                Ok(Status::LayoutChanged(self.layout))
            },
            Intent::ZoomOut => {
                self.layout.zoom_out();
                Ok(Status::LayoutChanged(self.layout))
            },
            Intent::ToggleFormat => {
                self.format = self.format.toggle();
                Ok(Status::FormatChanged(self.format))
            },
        }
    }

    /// Merges the stack, then clears it. A failed merge keeps the stack.
    fn confirm(&mut self) -> Result<Status>{
        let out_dir = self.stack.output_dir().unwrap_or(Path::new(""));
        let out_name = self.stack.output_name().unwrap_or_default();
        let outcome = export::merge(
            self.stack.images(), self.layout.direction, out_dir, out_name, self.format
        )?;
        self.stack.clear();
        Ok(match outcome{
            MergeOutcome::Written(path) => Status::Exported(path),
            MergeOutcome::NothingToMerge => Status::NothingToMerge,
        })
    }

    /// Where each preview goes on screen.
    pub fn placements(&self, origin: (i32, i32)) -> Vec<Placement>{
        layout::placements(&self.stack.sizes(), &self.layout, origin)
    }
}

/// Logs the outcome of an intent the way the frontends show it to the user.
pub fn report(result: &Result<Status>){
    match result{
        Ok(Status::Exported(path)) => log::info!("Saved {}", path.display()),
        Ok(Status::NothingToMerge) => log::warn!("Need at least two images to merge"),
        Ok(Status::Added{ count }) => log::debug!("{} image(s) stacked", count),
        Ok(status) => log::debug!("{:?}", status),
        Err(e) => log::error!("{}", e),
    }
}

#[cfg(test)]
mod tests{

    use super::*;
    use crate::{
        error::Error,
        layout::Direction,
        stack::tests::write_png,
    };

    #[test]
    fn test_confirm_exports_and_clears(){
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "shot.png", 10, 4, [0, 0, 0]);
        let b = write_png(dir.path(), "other.png", 6, 8, [0, 0, 0]);

        let mut s = Session::default();
        assert_eq!(s.handle(Intent::AddImage(a)).unwrap(), Status::Added{ count: 1 });
        assert_eq!(s.handle(Intent::AddImage(b)).unwrap(), Status::Added{ count: 2 });
        s.handle(Intent::ToggleDirection).unwrap();
        assert_eq!(s.handle(Intent::ToggleFormat).unwrap(), Status::FormatChanged(ExportFormat::Jpeg));

        let out = dir.path().join("shot_combined.jpeg");
        assert_eq!(s.handle(Intent::Confirm).unwrap(), Status::Exported(out.clone()));
        assert_eq!(s.stack().count(), 0);
        assert_eq!(s.stack().output_name(), None);
        let saved = image::open(&out).unwrap();
        assert_eq!((saved.width(), saved.height()), (16, 8));
    }

    #[test]
    fn test_confirm_single_image(){
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "lonely.png", 2, 2, [0, 0, 0]);
        let mut s = Session::default();
        s.handle(Intent::AddImage(a)).unwrap();
        assert_eq!(s.handle(Intent::Confirm).unwrap(), Status::NothingToMerge);
        assert_eq!(s.stack().count(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_export_keeps_stack(){
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let a = write_png(&sub, "a.png", 2, 2, [0, 0, 0]);
        let b = write_png(&sub, "b.png", 2, 2, [0, 0, 0]);

        let mut s = Session::default();
        s.handle(Intent::AddImage(a)).unwrap();
        s.handle(Intent::AddImage(b)).unwrap();
        std::fs::remove_dir_all(&sub).unwrap();

        assert!(matches!(s.handle(Intent::Confirm), Err(Error::Io{ .. })));
        assert_eq!(s.stack().count(), 2);
        assert_eq!(s.stack().output_name(), Some("a"));

        assert_eq!(s.handle(Intent::Cancel).unwrap(), Status::Cleared);
        assert_eq!(s.stack().count(), 0);
    }

    #[test]
    fn test_rejected_drop(){
        let dir = tempfile::tempdir().unwrap();
        let mut s = Session::default();
        let err = s.handle(Intent::AddImage(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, Error::InvalidSource(_)));
        assert_eq!(s.stack().count(), 0);
    }

    #[test]
    fn test_layout_intents(){
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 20, 10, [0, 0, 0]);
        let b = write_png(dir.path(), "b.png", 20, 10, [0, 0, 0]);
        let mut s = Session::new(LayoutState::new(Direction::Horizontal, 1.0), ExportFormat::Png);
        s.handle(Intent::AddImage(a)).unwrap();
        s.handle(Intent::AddImage(b)).unwrap();
        s.handle(Intent::ZoomIn).unwrap();

        let ps = s.placements((0, 32));
        assert_eq!((ps[1].x, ps[1].y, ps[1].w, ps[1].h), (40, 32, 40, 20));

        s.handle(Intent::ZoomOut).unwrap();
        match s.handle(Intent::ToggleDirection).unwrap(){
            Status::LayoutChanged(l) => {
                assert_eq!(l.direction, Direction::Vertical);
                assert_eq!(l.render_scale(), 1.0);
            },
            other => panic!("unexpected status {:?}", other),
        }
        // preview scale never leaks into the export
        assert_eq!(s.stack().extent(s.layout.direction), Some((20, 20)));
    }
}
