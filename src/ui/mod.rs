pub mod interactive;
pub mod menu;
pub mod navigation;
pub mod teletext;
pub mod view;

pub use interactive::{InteractiveState, run_interactive_ui};
pub use menu::{build_match_action, build_root_menu, build_score_view, build_submenu};
pub use navigation::{FrameId, FrameKind, NavError, NavigationFrame, NavigationStack, OverlayInsets};
pub use view::{Action, InputEvent, RawInput, ViewNode};
