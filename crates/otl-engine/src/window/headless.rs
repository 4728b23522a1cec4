use std::collections::VecDeque;

use anyhow::Result;

use crate::coords::Viewport;
use crate::input::{InputEvent, InputState};
use crate::render::Canvas;

use super::{fps_title, Screen};

/// In-memory [`Screen`].
///
/// Events are scripted per frame: each [`poll_events`](Screen::poll_events)
/// call delivers the next queued batch. Presents are counted and the last
/// presented frame is kept for inspection.
#[derive(Debug)]
pub struct HeadlessScreen {
    title: String,
    readout: String,
    canvas: Canvas,
    input: InputState,
    frames: VecDeque<Vec<InputEvent>>,
    presents: u64,
    last_frame: Option<Canvas>,
}

impl HeadlessScreen {
    pub fn new(size: Viewport) -> Self {
        Self {
            title: "otl".to_string(),
            readout: String::new(),
            canvas: Canvas::new(size),
            input: InputState::default(),
            frames: VecDeque::new(),
            presents: 0,
            last_frame: None,
        }
    }

    /// Queues the events delivered by one future `poll_events` call.
    pub fn queue_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    pub fn presents(&self) -> u64 {
        self.presents
    }

    /// Last frame-rate readout, formatted like a window title.
    pub fn readout(&self) -> &str {
        &self.readout
    }

    pub fn last_frame(&self) -> Option<&Canvas> {
        self.last_frame.as_ref()
    }
}

impl Screen for HeadlessScreen {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let events = self.frames.pop_front().unwrap_or_default();
        for ev in &events {
            self.input.apply(ev);
            if let InputEvent::Resized { width, height } = ev {
                self.canvas.set_size(Viewport::new(*width, *height));
            }
        }
        Ok(events)
    }

    fn input(&self) -> &InputState {
        &self.input
    }

    fn canvas(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn size(&self) -> Viewport {
        self.canvas.size()
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        self.last_frame = Some(self.canvas.clone());
        self.canvas.reset();
        Ok(())
    }

    fn show_fps(&mut self, fps: f32) {
        self.readout = fps_title(&self.title, fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Color, Rect};
    use crate::input::{Key, KeyState};

    #[test]
    fn delivers_one_batch_per_poll() {
        let mut s = HeadlessScreen::new(Viewport::new(10.0, 10.0));
        s.queue_frame(vec![InputEvent::Focused(true)]);
        s.queue_frame(vec![InputEvent::Quit]);
        assert_eq!(s.poll_events().unwrap(), vec![InputEvent::Focused(true)]);
        assert_eq!(s.poll_events().unwrap(), vec![InputEvent::Quit]);
        assert!(s.poll_events().unwrap().is_empty());
    }

    #[test]
    fn polled_events_update_input_state() {
        let mut s = HeadlessScreen::new(Viewport::new(10.0, 10.0));
        s.queue_frame(vec![InputEvent::Key {
            key: Key::Letter('D'),
            state: KeyState::Pressed,
            repeat: false,
        }]);
        s.poll_events().unwrap();
        assert!(s.input().key_down(Key::Letter('D')));
    }

    #[test]
    fn resize_event_resizes_canvas() {
        let mut s = HeadlessScreen::new(Viewport::new(10.0, 10.0));
        s.queue_frame(vec![InputEvent::Resized { width: 640.0, height: 480.0 }]);
        s.poll_events().unwrap();
        assert_eq!(s.size(), Viewport::new(640.0, 480.0));
    }

    #[test]
    fn present_snapshots_and_resets() {
        let mut s = HeadlessScreen::new(Viewport::new(10.0, 10.0));
        s.canvas().rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::white());
        s.present().unwrap();
        assert_eq!(s.presents(), 1);
        assert_eq!(s.last_frame().unwrap().triangle_count(), 2);
        assert_eq!(s.canvas().triangle_count(), 0);
    }
}
