use crate::session::Intent;

pub const BAR_HEIGHT: u32 = 32;
pub const BUTTON_SIZE: u32 = 32;
pub const BUTTON_GAP: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button{
    Confirm,
    Cancel,
    Direction,
    ZoomOut,
    ZoomIn,
    FileType,
}

impl Button{
    pub const ALL: [Button; 6] = [
        Button::Confirm, Button::Cancel, Button::Direction,
        Button::ZoomOut, Button::ZoomIn, Button::FileType,
    ];

    pub fn intent(self) -> Intent{
        match self{
            Button::Confirm => Intent::Confirm,
            Button::Cancel => Intent::Cancel,
            Button::Direction => Intent::ToggleDirection,
            Button::ZoomOut => Intent::ZoomOut,
            Button::ZoomIn => Intent::ZoomIn,
            Button::FileType => Intent::ToggleFormat,
        }
    }

    /// Fill colour; toggles pass their current state to pick one of two shades.
    pub fn color(self, toggled: bool) -> (u8, u8, u8){
        match (self, toggled){
            (Button::Confirm, _) => (50, 200, 0),
            (Button::Cancel, _) => (200, 50, 0),
            (Button::ZoomOut, _) | (Button::ZoomIn, _) => (200, 100, 180),
            (_, false) => (180, 180, 180),
            (_, true) => (110, 110, 110),
        }
    }

    /// (x, y, w, h) in window pixels.
    pub fn rect(self) -> (i32, i32, u32, u32){
        let i = Button::ALL.iter().position(|b| *b == self).unwrap_or(0) as u32;
        ((i * (BUTTON_SIZE + BUTTON_GAP)) as i32, 0, BUTTON_SIZE, BUTTON_SIZE)
    }

    pub fn contains(self, x: i32, y: i32) -> bool{
        let (bx, by, w, h) = self.rect();
        x >= bx && x < bx + w as i32 && y >= by && y < by + h as i32
    }
}

pub struct MenuBar;

impl MenuBar{
    pub fn hit(x: i32, y: i32) -> Option<Intent>{
        Button::ALL.iter().find(|b| b.contains(x, y)).map(|b| b.intent())
    }
}

#[cfg(test)]
mod tests{

    use super::*;

    #[test]
    fn test_hit(){
        assert_eq!(MenuBar::hit(0, 0), Some(Intent::Confirm));
        assert_eq!(MenuBar::hit(31, 31), Some(Intent::Confirm));
        assert_eq!(MenuBar::hit(33, 10), None);
        assert_eq!(MenuBar::hit(36, 10), Some(Intent::Cancel));
        assert_eq!(MenuBar::hit(2 * 36 + 5, 5), Some(Intent::ToggleDirection));
        assert_eq!(MenuBar::hit(5 * 36, 0), Some(Intent::ToggleFormat));
        assert_eq!(MenuBar::hit(6 * 36, 0), None);
        assert_eq!(MenuBar::hit(10, 32), None);
        assert_eq!(MenuBar::hit(-1, 5), None);
    }

    #[test]
    fn test_toggle_colors_differ(){
        assert_ne!(Button::Direction.color(false), Button::Direction.color(true));
        assert_eq!(Button::Confirm.color(false), Button::Confirm.color(true));
    }
}
