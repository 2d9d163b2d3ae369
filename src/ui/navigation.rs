//! Bounded stack of nested overlay frames.

use super::view::{Action, RawInput, ViewNode};
use crate::constants::overlay::{HORIZONTAL_STEP, PAGE_STEP, VERTICAL_STEP};
use thiserror::Error;
use tracing::debug;

/// Identity of a frame for as long as it stays on the stack. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    Root,
    Submenu(String),
    /// Score page of the match with this id.
    Score(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    #[error("navigation depth limit of {max} reached")]
    Overflow { max: usize },
    #[error("already at the root menu")]
    AtRoot,
}

#[derive(Debug, Clone)]
pub struct NavigationFrame {
    id: FrameId,
    kind: FrameKind,
    view: ViewNode,
    cursor: usize,
    scroll: usize,
}

impl NavigationFrame {
    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn kind(&self) -> &FrameKind {
        &self.kind
    }

    pub fn view(&self) -> &ViewNode {
        &self.view
    }

    /// Index of the focused button.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First visible content line of a frame that scrolls instead of moving focus.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Frames with at most one button scroll their content with the movement keys.
    pub fn scrolls_content(&self) -> bool {
        self.view.button_count() <= 1
    }

    pub fn focused_action(&self) -> Option<&Action> {
        self.view.buttons().get(self.cursor).copied()
    }

    pub fn action_at(&self, index: usize) -> Option<&Action> {
        self.view.buttons().get(index).copied()
    }

    /// Moves focus to `index` if the view has such a button.
    pub fn focus(&mut self, index: usize) -> bool {
        if index < self.view.button_count() && index != self.cursor {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// Applies a focus movement, or a scroll on frames that scroll their content.
    /// Returns whether anything moved.
    pub fn handle_input(&mut self, input: RawInput) -> bool {
        if self.scrolls_content() {
            let last_line = self.view.lines().len().saturating_sub(1);
            let target = step(self.scroll, last_line, input);
            let moved = target != self.scroll;
            self.scroll = target;
            return moved;
        }
        let last = self.view.button_count() - 1;
        let target = step(self.cursor, last, input);
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    fn set_view(&mut self, view: ViewNode) {
        self.cursor = self.cursor.min(view.button_count().saturating_sub(1));
        self.scroll = self.scroll.min(view.lines().len().saturating_sub(1));
        self.view = view;
    }
}

fn step(current: usize, last: usize, input: RawInput) -> usize {
    match input {
        RawInput::Up => current.saturating_sub(1),
        RawInput::Down => (current + 1).min(last),
        RawInput::Home => 0,
        RawInput::End => last,
        RawInput::PageUp => current.saturating_sub(PAGE_STEP),
        RawInput::PageDown => (current + PAGE_STEP).min(last),
    }
}

/// Margins of the box drawn for one stack level, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayInsets {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl OverlayInsets {
    /// Cascading layout: each level shifts right and down, and the deepest possible level
    /// sits flush with the bottom-right corner. Levels past `max_depth - 1` share its box.
    pub fn for_level(level: usize, max_depth: usize) -> Self {
        let max_level = max_depth.max(1) - 1;
        let level = level.min(max_level);
        let below = max_level - level;
        let level = u16::try_from(level).unwrap_or(u16::MAX);
        let below = u16::try_from(below).unwrap_or(u16::MAX);
        Self {
            left: level.saturating_mul(HORIZONTAL_STEP),
            right: below.saturating_mul(HORIZONTAL_STEP),
            top: level.saturating_mul(VERTICAL_STEP),
            bottom: below.saturating_mul(VERTICAL_STEP),
        }
    }
}

/// Stack of frames, never empty, never deeper than `max_depth`.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    frames: Vec<NavigationFrame>,
    max_depth: usize,
    next_id: u64,
}

impl NavigationStack {
    /// Creates a stack holding only the root frame. A `max_depth` of 0 is treated as 1.
    pub fn new(root_view: ViewNode, max_depth: usize) -> Self {
        let mut stack = Self {
            frames: Vec::with_capacity(max_depth.max(1)),
            max_depth: max_depth.max(1),
            next_id: 0,
        };
        let root = stack.make_frame(FrameKind::Root, root_view);
        stack.frames.push(root);
        stack
    }

    fn make_frame(&mut self, kind: FrameKind, view: ViewNode) -> NavigationFrame {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        NavigationFrame {
            id,
            kind,
            view,
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn push(&mut self, kind: FrameKind, view: ViewNode) -> Result<FrameId, NavError> {
        if self.frames.len() >= self.max_depth {
            debug!("Push of {:?} rejected at depth {}", kind, self.frames.len());
            return Err(NavError::Overflow {
                max: self.max_depth,
            });
        }
        let frame = self.make_frame(kind, view);
        let id = frame.id;
        debug!("Pushed {:?} as {:?}", frame.kind, id);
        self.frames.push(frame);
        Ok(id)
    }

    pub fn pop(&mut self) -> Result<NavigationFrame, NavError> {
        if self.frames.len() <= 1 {
            return Err(NavError::AtRoot);
        }
        self.frames.pop().ok_or(NavError::AtRoot)
    }

    /// Drops every frame above the root and gives the root a fresh view with focus reset.
    pub fn reset_to_root(&mut self, root_view: ViewNode) {
        self.frames.truncate(1);
        if let Some(root) = self.frames.first_mut() {
            root.view = root_view;
            root.cursor = 0;
            root.scroll = 0;
        }
    }

    /// Swaps the root's view without touching the frames above it.
    pub fn replace_root(&mut self, root_view: ViewNode) {
        if let Some(root) = self.frames.first_mut() {
            root.set_view(root_view);
        }
    }

    /// Swaps the view of frame `id`. Returns `false` when the frame is gone.
    pub fn replace_view(&mut self, id: FrameId, view: ViewNode) -> bool {
        match self.frame_mut(id) {
            Some(frame) => {
                frame.set_view(view);
                true
            }
            None => false,
        }
    }

    pub fn top(&self) -> &NavigationFrame {
        // never empty
        &self.frames[self.frames.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut NavigationFrame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn root(&self) -> &NavigationFrame {
        &self.frames[0]
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        &self.frames
    }

    pub fn frame_mut(&mut self, id: FrameId) -> Option<&mut NavigationFrame> {
        self.frames.iter_mut().find(|frame| frame.id == id)
    }

    pub fn contains(&self, id: FrameId) -> bool {
        self.frames.iter().any(|frame| frame.id == id)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Forwards a focus movement to the top frame.
    pub fn forward_input(&mut self, input: RawInput) -> bool {
        self.top_mut().handle_input(input)
    }

    pub fn insets(&self, level: usize) -> OverlayInsets {
        OverlayInsets::for_level(level, self.max_depth)
    }
}
