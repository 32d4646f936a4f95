// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A backend that records calls instead of rasterizing.
//!
//! [`RecordingBackend`] implements [`RenderBackend`] by appending a
//! [`DrawCommand`] per call. Text is measured with a fixed advance model (see
//! [`RecordingBackend::measure`]) so tests can predict leaf growth, the clip
//! stack is tracked so unbalanced push/pop shows up as an error, and
//! [`fail_on_draw`](RecordingBackend::fail_on_draw) injects a failure to
//! exercise error propagation.

use strata_core::appearance::{CornerRadii, TextAppearance};
use strata_core::backend::{DrawBackend, RenderBackend};
use strata_core::geometry::{Point, Rect, Size};
use strata_core::paint::Paint;

/// Errors produced by [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordingError {
    /// A failure requested with [`RecordingBackend::fail_on_draw`].
    #[error("injected failure on draw call {call}")]
    Injected {
        /// 1-based index of the failing draw call.
        call: usize,
    },
    /// `pop_clip` was called with no clip on the stack.
    #[error("pop_clip without a matching push_clip")]
    UnbalancedClip,
}

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    /// [`RenderBackend::init`].
    Init {
        /// Surface width.
        width: u32,
        /// Surface height.
        height: u32,
    },
    /// [`RenderBackend::update_viewport_size`].
    Viewport {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
    /// [`DrawBackend::push_clip`].
    PushClip(Rect),
    /// [`DrawBackend::pop_clip`].
    PopClip,
    /// [`DrawBackend::draw_rect`].
    Rect {
        /// Painted area.
        area: Rect,
        /// Corner radii.
        radii: CornerRadii,
        /// Fill and stroke.
        paint: Paint,
        /// Effective clip (intersection of the clip stack), if any.
        clip: Option<Rect>,
    },
    /// [`DrawBackend::draw_text`].
    Text {
        /// Top-left corner of the run.
        origin: Point,
        /// Text content.
        content: String,
        /// Measured size reported back.
        size: Size,
        /// Fill and stroke.
        paint: Paint,
        /// Effective clip (intersection of the clip stack), if any.
        clip: Option<Rect>,
    },
    /// [`RenderBackend::flush`].
    Flush,
}

impl DrawCommand {
    /// Returns the area painted by a draw command, or `None` for other
    /// commands.
    #[must_use]
    pub fn painted_area(&self) -> Option<Rect> {
        match self {
            Self::Rect { area, .. } => Some(*area),
            Self::Text { origin, size, .. } => Some(Rect::from_origin_size(
                origin.x,
                origin.y,
                size.width,
                size.height,
            )),
            _ => None,
        }
    }
}

/// A [`RenderBackend`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    clips: Vec<Rect>,
    draw_calls: usize,
    fail_on: Option<usize>,
}

impl RecordingBackend {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures a text run: each character advances half the font size
    /// (rounded up), and the height is the font size.
    #[must_use]
    pub fn measure(text: &TextAppearance) -> Size {
        let chars = u32::try_from(text.content.chars().count()).unwrap_or(u32::MAX);
        let advance = text.font.size.div_ceil(2);
        Size::new(chars.saturating_mul(advance), text.font.size)
    }

    /// Makes the `call`-th draw call (1-based, counted from now on) fail
    /// with [`RecordingError::Injected`].
    pub fn fail_on_draw(&mut self, call: usize) {
        self.fail_on = Some(self.draw_calls + call);
    }

    /// Returns every recorded command.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Removes and returns every recorded command.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Forgets recorded commands. The clip stack and failure injection are
    /// kept.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns the painted areas of draw commands, in paint order.
    #[must_use]
    pub fn draw_areas(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(DrawCommand::painted_area)
            .collect()
    }

    /// Returns the number of clips currently pushed.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    fn current_clip(&self) -> Option<Rect> {
        let mut clips = self.clips.iter().copied();
        let first = clips.next()?;
        Some(clips.fold(first, |acc, c| acc.intersect(c).unwrap_or_default()))
    }

    fn count_draw(&mut self) -> Result<(), RecordingError> {
        self.draw_calls += 1;
        if self.fail_on == Some(self.draw_calls) {
            self.fail_on = None;
            let call = self.draw_calls;
            return Err(RecordingError::Injected { call });
        }
        Ok(())
    }
}

impl DrawBackend for RecordingBackend {
    type Error = RecordingError;

    fn draw_rect(
        &mut self,
        area: Rect,
        radii: &CornerRadii,
        paint: &Paint,
    ) -> Result<(), Self::Error> {
        self.count_draw()?;
        let clip = self.current_clip();
        self.commands.push(DrawCommand::Rect {
            area,
            radii: *radii,
            paint: *paint,
            clip,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &TextAppearance,
        paint: &Paint,
    ) -> Result<Size, Self::Error> {
        self.count_draw()?;
        let size = Self::measure(text);
        let clip = self.current_clip();
        self.commands.push(DrawCommand::Text {
            origin,
            content: text.content.clone(),
            size,
            paint: *paint,
            clip,
        });
        Ok(size)
    }

    fn push_clip(&mut self, clip: Rect) -> Result<(), Self::Error> {
        self.clips.push(clip);
        self.commands.push(DrawCommand::PushClip(clip));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), Self::Error> {
        self.clips.pop().ok_or(RecordingError::UnbalancedClip)?;
        self.commands.push(DrawCommand::PopClip);
        Ok(())
    }
}

impl RenderBackend for RecordingBackend {
    fn init(&mut self, width: u32, height: u32) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Init { width, height });
        Ok(())
    }

    fn update_viewport_size(&mut self, width: u32, height: u32) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Viewport { width, height });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Flush);
        Ok(())
    }
}
