//! Toolkit-independent view tree and input vocabulary.
//!
//! Menus and score pages are plain data. The teletext renderer is the only code that
//! knows how a [`ViewNode`] looks on screen.

use crate::data_fetcher::models::Match;

/// What a button does when activated.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Push a nested menu.
    OpenSubmenu { title: String, view: Box<ViewNode> },
    /// Push a score frame for the match and fetch its table.
    ShowScore(Match),
    Back,
    Refresh,
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    /// Static text; may span several lines.
    Text(String),
    Button { label: String, action: Action },
    List(Vec<ViewNode>),
    Container(Box<ViewNode>),
}

/// Input the core understands. Anything that is not activation or one of the global
/// commands is passed through as [`RawInput`] to the focused frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Activate the n-th button of the top frame.
    Activate(usize),
    Back,
    Refresh,
    Exit,
    Other(RawInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// One rendered line of a view. `button` is the button's index among the view's buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub text: String,
    pub button: Option<usize>,
}

impl ViewNode {
    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Text(text.into())
    }

    pub fn button(label: impl Into<String>, action: Action) -> Self {
        ViewNode::Button {
            label: label.into(),
            action,
        }
    }

    pub fn divider() -> Self {
        ViewNode::Text(String::new())
    }

    /// Activatable actions in display order.
    pub fn buttons(&self) -> Vec<&Action> {
        let mut out = Vec::new();
        self.collect_buttons(&mut out);
        out
    }

    fn collect_buttons<'a>(&'a self, out: &mut Vec<&'a Action>) {
        match self {
            ViewNode::Text(_) => {}
            ViewNode::Button { action, .. } => out.push(action),
            ViewNode::List(children) => {
                for child in children {
                    child.collect_buttons(out);
                }
            }
            ViewNode::Container(child) => child.collect_buttons(out),
        }
    }

    pub fn button_count(&self) -> usize {
        self.buttons().len()
    }

    /// Flattens the tree into display lines.
    pub fn lines(&self) -> Vec<ViewLine> {
        let mut out = Vec::new();
        let mut next_button = 0;
        self.collect_lines(&mut out, &mut next_button);
        out
    }

    fn collect_lines(&self, out: &mut Vec<ViewLine>, next_button: &mut usize) {
        match self {
            ViewNode::Text(text) if text.is_empty() => out.push(ViewLine {
                text: String::new(),
                button: None,
            }),
            ViewNode::Text(text) => out.extend(text.lines().map(|line| ViewLine {
                text: line.to_string(),
                button: None,
            })),
            ViewNode::Button { label, .. } => {
                out.push(ViewLine {
                    text: format!("< {label} >"),
                    button: Some(*next_button),
                });
                *next_button += 1;
            }
            ViewNode::List(children) => {
                for child in children {
                    child.collect_lines(out, next_button);
                }
            }
            ViewNode::Container(child) => child.collect_lines(out, next_button),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ViewNode {
        ViewNode::Container(Box::new(ViewNode::List(vec![
            ViewNode::text("标题"),
            ViewNode::divider(),
            ViewNode::button("一", Action::Refresh),
            ViewNode::text("line 1\nline 2"),
            ViewNode::button("二", Action::Exit),
        ])))
    }

    #[test]
    fn test_buttons_in_display_order() {
        let view = sample();
        assert_eq!(view.buttons(), vec![&Action::Refresh, &Action::Exit]);
        assert_eq!(view.button_count(), 2);
    }

    #[test]
    fn test_lines_flatten_and_number_buttons() {
        let lines = sample().lines();
        let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["标题", "", "< 一 >", "line 1", "line 2", "< 二 >"]
        );
        assert_eq!(lines[2].button, Some(0));
        assert_eq!(lines[5].button, Some(1));
        assert_eq!(lines[3].button, None);
    }
}
