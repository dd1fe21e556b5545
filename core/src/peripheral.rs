use crate::error::RunError;
use crate::keypad::Keypad;
use crate::screen::FrameBuffer;

/// Whether the scheduler should keep going after polling input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Draws frames for the machine. It should abstract the implementation
/// details, so a variety of kinds of screen would work.
pub trait DisplaySink {
    /// Repaint the whole 64x32 grid from `frame`, one square per cell.
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), RunError>;
}

/// Reads key presses into the keypad.
pub trait InputSource {
    /// Drain pending input events, updating `keypad` with presses and
    /// releases, and report whether a quit was requested.
    fn poll(&mut self, keypad: &mut Keypad) -> Result<Control, RunError>;
}
