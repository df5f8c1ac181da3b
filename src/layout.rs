use image::{
    DynamicImage, RgbaImage,
    imageops::{ self, FilterType },
};

pub const MIN_SCALE: f32 = 1.0 / 64.0;
pub const MAX_SCALE: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction{
    #[default]
    Vertical,
    Horizontal,
}

impl Direction{
    pub fn toggle(self) -> Self{
        match self{
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    pub fn name(self) -> &'static str{
        match self{
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

/// How the strip is shown on screen. Only the direction reaches the merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState{
    pub direction: Direction,
    render_scale: f32,
}

impl Default for LayoutState{
    fn default() -> Self{
        Self{ direction: Direction::Vertical, render_scale: 1.0 }
    }
}

impl LayoutState{
    pub fn new(direction: Direction, render_scale: f32) -> Self{
        let render_scale = if render_scale.is_finite() && render_scale > 0.0 {
            render_scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            1.0
        };
        Self{ direction, render_scale }
    }

    pub fn render_scale(&self) -> f32{
        self.render_scale
    }

    pub fn toggle_direction(&mut self){
        self.direction = self.direction.toggle();
    }

    pub fn zoom_in(&mut self){
        self.render_scale = (self.render_scale * 2.0).min(MAX_SCALE);
    }

    pub fn zoom_out(&mut self){
        self.render_scale = (self.render_scale / 2.0).max(MIN_SCALE);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasPlan{
    pub width: u32,
    pub height: u32,
    /// Top-left corner of every image, in input order.
    pub offsets: Vec<(u32, u32)>,
}

/// Lays out unscaled image sizes end to end. `None` when the canvas does not fit in `u32`.
pub fn plan(sizes: &[(u32, u32)], direction: Direction) -> Option<CanvasPlan>{
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut along = 0u32;
    let mut across = 0u32;
    for &(w, h) in sizes{
        let (len, thick) = match direction{
            Direction::Vertical => (h, w),
            Direction::Horizontal => (w, h),
        };
        offsets.push(match direction{
            Direction::Vertical => (0, along),
            Direction::Horizontal => (along, 0),
        });
        along = along.checked_add(len)?;
        across = across.max(thick);
    }
    let (width, height) = match direction{
        Direction::Vertical => (across, along),
        Direction::Horizontal => (along, across),
    };
    Some(CanvasPlan{ width, height, offsets })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement{
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

pub fn scaled_dim(d: u32, scale: f32) -> u32{
    ((d as f64 * scale as f64) as u32).max(1)
}

/// Screen rectangles for the preview strip, starting at `origin`.
pub fn placements(sizes: &[(u32, u32)], layout: &LayoutState, origin: (i32, i32)) -> Vec<Placement>{
    let (mut x, mut y) = origin;
    let scale = layout.render_scale();
    sizes.iter().enumerate().map(|(index, &(w, h))| {
        let w = scaled_dim(w, scale);
        let h = scaled_dim(h, scale);
        let p = Placement{ index, x, y, w, h };
        match layout.direction{
            Direction::Vertical => y = y.saturating_add(h.min(i32::MAX as u32) as i32),
            Direction::Horizontal => x = x.saturating_add(w.min(i32::MAX as u32) as i32),
        }
        p
    }).collect()
}

/// Largest size with the same aspect ratio that fits in `max`. A zero limit means unbounded.
pub fn fit_within((w, h): (u32, u32), (max_w, max_h): (u32, u32)) -> (u32, u32){
    let max_w = if max_w == 0 { u32::MAX } else { max_w };
    let max_h = if max_h == 0 { u32::MAX } else { max_h };
    if w <= max_w && h <= max_h{
        return (w, h);
    }
    let (w, h, max_w, max_h) = (w as u64, h as u64, max_w as u64, max_h as u64);
    let (fw, fh) = if w * max_h >= h * max_w {
        (max_w, (h * max_w / w).max(1))
    } else {
        ((w * max_h / h).max(1), max_h)
    };
    (fw as u32, fh as u32)
}

/// RGBA copy of `image` for texture upload, shrunk when a side exceeds `max`.
/// The copy is stretched back to its placement when drawn.
pub fn texture_preview(image: &DynamicImage, max: (u32, u32)) -> RgbaImage{
    let rgba = image.to_rgba8();
    let (w, h) = fit_within(rgba.dimensions(), max);
    if (w, h) == rgba.dimensions(){
        return rgba;
    }
    imageops::resize(&rgba, w, h, FilterType::Triangle)
}
