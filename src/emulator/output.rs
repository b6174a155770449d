use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

type Pixels = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Pixels = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The monochrome display, 32 rows of 64 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Pixels,
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer { pixels: EMPTY_SCREEN }
    }

    pub fn clear(&mut self) {
        self.pixels = EMPTY_SCREEN;
    }

    /// Panics if the coordinates are outside the screen.
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    /// Flip a pixel, returning whether it was on before the flip.
    /// Coordinates wrap around the screen edges.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y % SCREEN_HEIGHT][x % SCREEN_WIDTH];
        let was_on = *pixel;
        *pixel = !was_on;
        was_on
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.pixels.iter()
    }

    pub fn lit_pixels(&self) -> usize {
        self.rows().flat_map(|row| row.iter()).filter(|&&on| on).count()
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &on in row.iter() {
                write!(f, "{}", if on { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Framebuffer({} lit)", self.lit_pixels())
    }
}

/// Represents a device that presents the framebuffer, and optionally a tone.
pub trait EmulatorOutput {
    fn refresh(&mut self, framebuffer: &Framebuffer, sounding: bool);
}

/// An output device that discards every frame.
pub struct DummyOutput;

impl EmulatorOutput for DummyOutput {
    fn refresh(&mut self, _: &Framebuffer, _: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_reports_previous_state() {
        let mut framebuffer = Framebuffer::new();
        assert!(!framebuffer.toggle(3, 4));
        assert!(framebuffer.is_on(3, 4));
        assert!(framebuffer.toggle(3, 4));
        assert!(!framebuffer.is_on(3, 4));
    }

    #[test]
    fn toggle_wraps_around_edges() {
        let mut framebuffer = Framebuffer::new();
        framebuffer.toggle(SCREEN_WIDTH + 1, SCREEN_HEIGHT + 2);
        assert!(framebuffer.is_on(1, 2));
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut framebuffer = Framebuffer::new();
        framebuffer.toggle(0, 0);
        framebuffer.toggle(63, 31);
        assert_eq!(framebuffer.lit_pixels(), 2);
        framebuffer.clear();
        assert_eq!(framebuffer.lit_pixels(), 0);
    }

    #[test]
    fn display_draws_one_line_per_row() {
        let mut framebuffer = Framebuffer::new();
        framebuffer.toggle(0, 0);
        framebuffer.toggle(2, 0);
        let text = framebuffer.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), SCREEN_HEIGHT);
        assert!(lines[0].starts_with("# # "));
        assert_eq!(lines[0].len(), SCREEN_WIDTH);
        assert!(lines[1].chars().all(|c| c == ' '));
    }
}
