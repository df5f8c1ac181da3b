use std::time::{ Duration, Instant };

pub struct Timer{
    start: Instant,
    lap: Instant,
}

impl Timer{
    pub fn new() -> Self{
        let start = Instant::now();
        Self{ start, lap: start }
    }

    /// Time since the last lap (or creation), and starts a new lap.
    pub fn lap(&mut self) -> Duration{
        let now = Instant::now();
        let d = now - self.lap;
        self.lap = now;
        d
    }

    pub fn total(&self) -> Duration{
        self.start.elapsed()
    }
}

impl Default for Timer{
    fn default() -> Self{
        Self::new()
    }
}
