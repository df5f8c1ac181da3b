use crate::{
    export::ExportFormat,
    layout::{ self, Direction },
    menu::{ Button, MenuBar, BAR_HEIGHT },
    session::{ self, Intent, Session },
    stack::SourceImage,
    timer::Timer,
};

use sdl2::{
    EventPump,
    event::Event,
    keyboard::Keycode,
    mouse::MouseButton,
    video::{ Window, WindowContext },
    render::{ BlendMode, Canvas, TextureCreator, Texture },
    pixels::{ PixelFormatEnum, Color },
    rect::Rect,
};

use std::time::Duration;

const FRAME: Duration = Duration::from_millis(33);

pub struct AppWindow{
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    textures: Vec<Option<Texture>>,
    title: String,
}

impl AppWindow{
    pub fn create() -> Result<(Self, EventPump), String>{
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window("Antoine", 550, 950)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self{
                canvas,
                texture_creator,
                textures: Vec::new(),
                title: String::new(),
            },
            event_pump
        ))
    }

    fn upload(&self, img: &SourceImage) -> Result<Texture, String>{
        let info = self.canvas.info();
        let preview = layout::texture_preview(img.image(), (info.max_texture_width, info.max_texture_height));
        let (w, h) = preview.dimensions();
        if (w, h) != img.dimensions(){
            log::debug!("Preview of {} shrunk to {}x{}", img.path().display(), w, h);
        }
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, w, h)
            .map_err(|e| e.to_string())?;
        texture.update(None, preview.as_raw(), 4 * w as usize).map_err(|e| e.to_string())?;
        texture.set_blend_mode(BlendMode::Blend);
        Ok(texture)
    }

    /// Keeps one texture per stacked image.
    pub fn sync_textures(&mut self, session: &Session){
        let images = session.stack().images();
        if images.len() < self.textures.len(){
            for texture in self.textures.drain(..).flatten(){
                // SAFETY: drain moved every texture out of `self.textures`, so nothing else
                // holds it, and `self.canvas`, which created it, is still alive.
                unsafe { texture.destroy(); }
            }
        }
        let mut timer = Timer::new();
        while self.textures.len() < images.len(){
            let img = &images[self.textures.len()];
            let texture = match self.upload(img){
                Ok(t) => Some(t),
                Err(e) => {
                    log::warn!("No preview for {}: {}", img.path().display(), e);
                    None
                },
            };
            self.textures.push(texture);
            log::debug!("Texture: {:?}", timer.lap());
        }
    }

    pub fn draw(&mut self, session: &Session) -> Result<(), String>{
        self.canvas.set_draw_color(Color::RGB(20, 20, 25));
        self.canvas.clear();

        for p in session.placements((0, BAR_HEIGHT as i32)){
            if let Some(Some(texture)) = self.textures.get(p.index){
                self.canvas.copy(texture, None, Some(Rect::new(p.x, p.y, p.w, p.h)))?;
            }
        }

        let (winw, _) = self.canvas.output_size()?;
        self.canvas.set_draw_color(Color::RGB(50, 50, 50));
        self.canvas.fill_rect(Rect::new(0, 0, winw, BAR_HEIGHT))?;
        for button in Button::ALL{
            let toggled = match button{
                Button::Direction => session.layout.direction == Direction::Horizontal,
                Button::FileType => session.format == ExportFormat::Jpeg,
                _ => false,
            };
            let (r, g, b) = button.color(toggled);
            let (x, y, w, h) = button.rect();
            self.canvas.set_draw_color(Color::RGB(r, g, b));
            self.canvas.fill_rect(Rect::new(x, y, w, h))?;
        }

        let title = format!(
            "Antoine | {} images | {} | {} | x{}",
            session.stack().count(),
            session.layout.direction.name(),
            session.format.name(),
            session.layout.render_scale(),
        );
        if title != self.title{
            self.canvas.window_mut().set_title(&title).map_err(|e| e.to_string())?;
            self.title = title;
        }

        self.canvas.present();
        Ok(())
    }
}

fn intent_for_key(kc: Keycode) -> Option<Intent>{
    match kc{
        Keycode::Return | Keycode::KpEnter => Some(Intent::Confirm),
        Keycode::R => Some(Intent::Cancel),
        Keycode::D => Some(Intent::ToggleDirection),
        Keycode::F => Some(Intent::ToggleFormat),
        Keycode::Plus | Keycode::Equals | Keycode::KpPlus => Some(Intent::ZoomIn),
        Keycode::Minus | Keycode::KpMinus => Some(Intent::ZoomOut),
        _ => None,
    }
}

pub fn run(mut session: Session) -> Result<(), String>{
    let (mut window, mut event_pump) = AppWindow::create()?;
    window.sync_textures(&session);
    log::info!("Drop images onto the window; Return merges, R clears, Escape quits");

    'running: loop{
        let mut intents = Vec::new();
        for event in event_pump.poll_iter(){
            match event{
                Event::Quit{ .. }
                | Event::KeyDown{ keycode: Some(Keycode::Escape), .. } => {
                    break 'running;
                },
                Event::DropFile{ filename, .. } => {
                    intents.push(Intent::AddImage(filename.into()));
                },
                Event::KeyDown{ keycode: Some(kc), .. } => {
                    intents.extend(intent_for_key(kc));
                },
                Event::MouseButtonDown{ mouse_btn: MouseButton::Left, x, y, .. } => {
                    intents.extend(MenuBar::hit(x, y));
                },
                _ => {}
            }
        }

        for intent in intents{
            session::report(&session.handle(intent));
            window.sync_textures(&session);
        }

        window.draw(&session)?;
        std::thread::sleep(FRAME);
    }

    log::info!("Antoine: finished.");
    Ok(())
}
